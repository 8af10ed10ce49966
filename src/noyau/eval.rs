//! Noyau : évaluation numérique + pipeline d’étude
//!
//! tokenize -> analyse -> Expr -> (évaluation en x0) + (dérivée -> évaluation en x0)
//!
//! L’évaluation est totale : aucune erreur, les cas limites numériques
//! (division par zéro, hors domaine) sortent en NaN / ±∞ (IEEE-754).

use log::debug;

use super::analyse::parse_jetons;
use super::erreurs::ParseError;
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};

impl Expr {
    /// Valeur de l’expression en `x` (repli en profondeur).
    pub fn evaluer(&self, x: f64) -> f64 {
        match self {
            Expr::Constant(v) => *v,
            Expr::Variable => x,
            Expr::Sum { terms } => terms.iter().fold(0.0, |acc, t| acc + t.evaluer(x)),
            Expr::Product { factors, coeff } => {
                coeff * factors.iter().fold(1.0, |acc, f| acc * f.evaluer(x))
            }
            // puissance réelle : base négative + exposant fractionnaire => NaN
            Expr::Power {
                base,
                exponent,
                coeff,
            } => coeff * base.evaluer(x).powf(*exponent),
            Expr::Quotient {
                numerator,
                denominator,
                coeff,
            } => coeff * numerator.evaluer(x) / denominator.evaluer(x),
            Expr::Trig {
                kind,
                argument,
                coeff,
            } => coeff * kind.appliquer(argument.evaluer(x)),
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub expression: String,
    pub derivee: String,
    pub note: String,
}

/// Résultat complet d’une étude de f en un point x0.
#[derive(Clone, Debug)]
pub struct Etude {
    pub fonction: Expr,
    pub derivee: Expr,
    pub valeur: f64,
    pub pente: f64,
    pub demarche: DemarcheNoyau,
}

/// API publique : lit f, la dérive une fois, évalue f et f' en `x0`.
///
/// Entrée vide => Err(ParseError::Vide) (cas bénin, l’appelant peut l’ignorer).
pub fn etudier(texte: &str, x0: f64) -> Result<Etude, ParseError> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(ParseError::Vide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);

    // 2) AST
    let fonction = parse_jetons(&jetons)?;

    // 3) Dérivée (nouvel arbre, indépendant)
    let derivee = fonction.deriver();
    debug!("f(x) = {fonction} ; f'(x) = {derivee}");

    // 4) Valeurs
    let valeur = fonction.evaluer(x0);
    let pente = derivee.evaluer(x0);

    let demarche = DemarcheNoyau {
        jetons: jetons_txt,
        expression: fonction.to_string(),
        derivee: derivee.to_string(),
        note: format!(
            "Pipeline: jetons → analyse → AST ({} nœuds) → dérivée ({} nœuds) → évaluation.",
            fonction.taille(),
            derivee.taille()
        ),
    };

    Ok(Etude {
        fonction,
        derivee,
        valeur,
        pente,
        demarche,
    })
}
