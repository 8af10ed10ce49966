// src/noyau/analyse.rs
//
// Analyse descendante récursive : jetons -> Expr
// Grammaire (précédence basse -> haute):
//   somme       := produit (('+'|'-') produit)*
//   produit     := signe_puissance (('*' | '/' | <implicite>) signe_puissance)*
//   signe_puiss := '-'? puissance
//   puissance   := atome ('^' exposant)?
//   exposant    := '-'? atome ('^' exposant)?      (associatif à droite, doit être constant)
//   atome       := NOMBRE | x | π | FONCTION '(' somme ')' | '(' somme ')'
//
// Règles:
// - Multiplication implicite : deux opérandes adjacents ("2x", "x sin(x)", "(x+1)(x-1)")
// - Moins unaire : replié dans le coefficient (pas de nœud “négation”), -x^2 = -(x^2)
// - Exposant : replié en nombre; s’il contient x => ExposantNonConstant (x^x refusé)
// - sqrt(u) / √u => u^0.5
// - Profondeur bornée (MAX_PROFONDEUR) : l'arbre produit reste parcourable
//   récursivement (deriver, evaluer, render) sans débordement de pile

use log::debug;

use super::erreurs::{InvalidExpressionError, ParseError};
use super::expr::Expr;
use super::jetons::{format_tok, tokenize, Jeton, Tok};
use super::trig::TrigKind;

/// Noms réservés pour de futures fonctions non trigonométriques.
const FONCTIONS_RESERVEES: [&str; 4] = ["ln", "log", "exp", "abs"];

/// Garde-fou anti-débordement de pile : niveaux cumulés de parenthèses,
/// arguments de fonction, exposants et opérateurs '*' '/' d'un même produit.
pub const MAX_PROFONDEUR: usize = 256;

/// API publique : texte -> AST.
///
/// Entrée vide (ou espaces) => Err(ParseError::Vide), distinguable via `est_vide()`.
pub fn parse(texte: &str) -> Result<Expr, ParseError> {
    if texte.trim().is_empty() {
        return Err(ParseError::Vide);
    }
    let jetons = tokenize(texte)?;
    let e = parse_jetons(&jetons)?;
    debug!("analyse: {texte:?} => {e}");
    Ok(e)
}

/// Construit l’AST à partir d’une suite de jetons déjà produite.
pub fn parse_jetons(jetons: &[Jeton]) -> Result<Expr, ParseError> {
    if jetons.is_empty() {
        return Err(ParseError::Vide);
    }

    let mut a = Analyseur {
        jetons,
        i: 0,
        profondeur: 0,
    };
    let e = a.somme()?;

    // tout doit être consommé
    if let Some(j) = a.courant() {
        let err = match &j.tok {
            Tok::RPar => InvalidExpressionError::ParentheseInattendue { pos: j.pos },
            t => InvalidExpressionError::JetonInattendu {
                jeton: format_tok(t),
                pos: j.pos,
            },
        };
        return Err(err.into());
    }

    // invariant : coefficients finis à la construction
    if !e.coefficients_finis() {
        return Err(InvalidExpressionError::CoefficientNonFini { pos: 0 }.into());
    }

    Ok(e)
}

struct Analyseur<'a> {
    jetons: &'a [Jeton],
    i: usize,
    profondeur: usize,
}

impl<'a> Analyseur<'a> {
    fn courant(&self) -> Option<&'a Jeton> {
        self.jetons.get(self.i)
    }

    fn regarde(&self) -> Option<&'a Tok> {
        self.courant().map(|j| &j.tok)
    }

    fn suivant(&mut self) -> Option<&'a Jeton> {
        let j = self.jetons.get(self.i)?;
        self.i += 1;
        Some(j)
    }

    fn position(&self) -> usize {
        self.courant().map(|j| j.pos).unwrap_or(0)
    }

    fn entrer(&mut self, pos: usize) -> Result<(), InvalidExpressionError> {
        self.profondeur += 1;
        if self.profondeur > MAX_PROFONDEUR {
            return Err(InvalidExpressionError::TropProfond { pos });
        }
        Ok(())
    }

    fn sortir(&mut self, n: usize) {
        self.profondeur -= n;
    }

    fn somme(&mut self) -> Result<Expr, InvalidExpressionError> {
        let mut termes = vec![self.produit()?];

        loop {
            match self.regarde() {
                Some(Tok::Plus) => {
                    self.i += 1;
                    termes.push(self.produit()?);
                }
                Some(Tok::Minus) => {
                    self.i += 1;
                    termes.push(self.produit()?.mise_a_l_echelle(-1.0));
                }
                _ => break,
            }
        }

        Ok(Expr::somme(termes))
    }

    fn produit(&mut self) -> Result<Expr, InvalidExpressionError> {
        let mut e = self.signe_puissance()?;
        // chaque opérateur peut ajouter un niveau (a/b/c => Quotient(Quotient(a, b), c))
        let mut niveaux = 0;

        loop {
            let pos = self.position();
            match self.regarde() {
                Some(Tok::Star) => {
                    self.i += 1;
                    self.entrer(pos)?;
                    niveaux += 1;
                    let d = self.signe_puissance()?;
                    e = Expr::produit(vec![e, d], 1.0);
                }
                Some(Tok::Slash) => {
                    self.i += 1;
                    self.entrer(pos)?;
                    niveaux += 1;
                    let d = self.signe_puissance()?;
                    e = Expr::quotient(e, d, 1.0);
                }
                // multiplication implicite : un opérande suit directement
                Some(Tok::Num(_)) | Some(Tok::Ident(_)) | Some(Tok::Pi) | Some(Tok::LPar) => {
                    self.entrer(pos)?;
                    niveaux += 1;
                    let d = self.signe_puissance()?;
                    e = Expr::produit(vec![e, d], 1.0);
                }
                _ => break,
            }
        }

        self.sortir(niveaux);
        Ok(e)
    }

    fn signe_puissance(&mut self) -> Result<Expr, InvalidExpressionError> {
        if matches!(self.regarde(), Some(Tok::Minus)) {
            self.i += 1;
            return Ok(self.puissance()?.mise_a_l_echelle(-1.0));
        }
        self.puissance()
    }

    fn puissance(&mut self) -> Result<Expr, InvalidExpressionError> {
        let base = self.atome()?;
        if matches!(self.regarde(), Some(Tok::Caret)) {
            self.i += 1;
            let n = self.exposant()?;
            return Ok(Expr::puissance(base, n, 1.0));
        }
        Ok(base)
    }

    /// Exposant numérique (replié). Associatif à droite : x^2^3 = x^8.
    fn exposant(&mut self) -> Result<f64, InvalidExpressionError> {
        let pos = self.position();
        self.entrer(pos)?;

        let negatif = matches!(self.regarde(), Some(Tok::Minus));
        if negatif {
            self.i += 1;
        }

        let a = self.atome()?;
        let e = if matches!(self.regarde(), Some(Tok::Caret)) {
            self.i += 1;
            let n = self.exposant()?;
            Expr::puissance(a, n, 1.0)
        } else {
            a
        };

        if e.contient_variable() {
            return Err(InvalidExpressionError::ExposantNonConstant { pos });
        }

        let v = e.evaluer(0.0);
        let v = if negatif { -v } else { v };
        if !v.is_finite() {
            return Err(InvalidExpressionError::CoefficientNonFini { pos });
        }
        self.sortir(1);
        Ok(v)
    }

    fn atome(&mut self) -> Result<Expr, InvalidExpressionError> {
        let j = self.suivant().ok_or(InvalidExpressionError::FinInattendue)?;

        match &j.tok {
            Tok::Num(v) => Ok(Expr::Constant(*v)),
            Tok::Pi => Ok(Expr::Constant(std::f64::consts::PI)),
            Tok::LPar => {
                self.entrer(j.pos)?;
                let e = self.somme()?;
                self.fermante(j.pos)?;
                self.sortir(1);
                Ok(e)
            }
            Tok::Ident(nom) => self.identifiant(nom, j.pos),
            Tok::RPar => Err(InvalidExpressionError::ParentheseInattendue { pos: j.pos }),
            t => Err(InvalidExpressionError::JetonInattendu {
                jeton: format_tok(t),
                pos: j.pos,
            }),
        }
    }

    /// x, fonction trig, sqrt, ou erreur.
    fn identifiant(&mut self, nom: &str, pos: usize) -> Result<Expr, InvalidExpressionError> {
        if nom == "x" {
            return Ok(Expr::Variable);
        }

        if let Some(kind) = TrigKind::depuis_nom(nom) {
            let arg = self.argument(nom, pos)?;
            return Ok(Expr::trig(kind, arg, 1.0));
        }

        if nom == "sqrt" {
            let arg = self.argument(nom, pos)?;
            return Ok(Expr::puissance(arg, 0.5, 1.0));
        }

        if FONCTIONS_RESERVEES.contains(&nom) {
            return Err(InvalidExpressionError::FonctionNonSupportee {
                nom: nom.to_string(),
                pos,
            });
        }

        Err(InvalidExpressionError::IdentifiantInconnu {
            nom: nom.to_string(),
            pos,
        })
    }

    /// '(' somme ')' collé au nom de fonction.
    fn argument(&mut self, nom: &str, pos: usize) -> Result<Expr, InvalidExpressionError> {
        match self.courant() {
            Some(Jeton {
                tok: Tok::LPar,
                pos: pos_par,
            }) => {
                let pos_par = *pos_par;
                self.i += 1;
                self.entrer(pos_par)?;
                let e = self.somme()?;
                self.fermante(pos_par)?;
                self.sortir(1);
                Ok(e)
            }
            _ => Err(InvalidExpressionError::FonctionSansParenthese {
                nom: nom.to_string(),
                pos,
            }),
        }
    }

    fn fermante(&mut self, pos_ouvrante: usize) -> Result<(), InvalidExpressionError> {
        match self.suivant() {
            Some(Jeton { tok: Tok::RPar, .. }) => Ok(()),
            None => Err(InvalidExpressionError::ParentheseNonFermee { pos: pos_ouvrante }),
            Some(j) => Err(InvalidExpressionError::JetonInattendu {
                jeton: format_tok(&j.tok),
                pos: j.pos,
            }),
        }
    }
}
