// src/noyau/erreurs.rs
//
// Erreurs typées du noyau.
// - LexError               : caractère non reconnu (tokenisation)
// - InvalidExpressionError : suite de jetons qui ne forme pas une expression complète
// - ParseError             : ce que voit l'appelant de `parse` (vide / lex / invalide)
//
// Aucune erreur numérique ici : division par zéro, arcsin(2), etc. sont des
// valeurs IEEE-754 (NaN, ±∞), pas des échecs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("caractère inattendu: '{c}' (position {pos})")]
    CaractereInattendu { c: char, pos: usize },

    #[error("nombre invalide: \"{texte}\" (position {pos})")]
    NombreInvalide { texte: String, pos: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidExpressionError {
    #[error("parenthèse non fermée (ouverte en position {pos})")]
    ParentheseNonFermee { pos: usize },

    #[error("parenthèse fermante inattendue (position {pos})")]
    ParentheseInattendue { pos: usize },

    #[error("expression incomplète: opérande attendu en fin d'entrée")]
    FinInattendue,

    #[error("jeton inattendu: \"{jeton}\" (position {pos})")]
    JetonInattendu { jeton: String, pos: usize },

    #[error("identifiant inconnu: \"{nom}\" (position {pos})")]
    IdentifiantInconnu { nom: String, pos: usize },

    #[error("fonction non supportée: \"{nom}\" (position {pos})")]
    FonctionNonSupportee { nom: String, pos: usize },

    #[error("fonction \"{nom}\" sans parenthèse (position {pos})")]
    FonctionSansParenthese { nom: String, pos: usize },

    /// Exposant symbolique (ex: x^x) : seuls les exposants numériques sont modélisés.
    #[error("exposant non constant (position {pos})")]
    ExposantNonConstant { pos: usize },

    #[error("coefficient non fini après repliement (position {pos})")]
    CoefficientNonFini { pos: usize },

    /// Imbrication au-delà de MAX_PROFONDEUR (parenthèses, fonctions, exposants, opérateurs '*' '/').
    #[error("expression trop imbriquée (position {pos})")]
    TropProfond { pos: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Entrée vide (ou seulement des espaces) : cas bénin, “pas de fonction”.
    #[error("Entrée vide")]
    Vide,

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Invalide(#[from] InvalidExpressionError),
}

impl ParseError {
    /// Vrai pour le cas bénin “entrée vide” (l'appelant peut l'ignorer).
    pub fn est_vide(&self) -> bool {
        matches!(self, ParseError::Vide)
    }
}
