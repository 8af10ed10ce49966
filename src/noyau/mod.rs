//! Noyau symbolique (une variable : x)
//!
//! Organisation interne :
//! - expr.rs     : AST (Constant/Variable/Sum/Product/Power/Quotient/Trig) + constructeurs
//! - trig.rs     : 24 fonctions trig : noms, évaluation, règles de dérivation
//! - erreurs.rs  : LexError / InvalidExpressionError / ParseError
//! - jetons.rs   : tokenisation
//! - analyse.rs  : descente récursive + multiplication implicite
//! - eval.rs     : évaluation numérique + pipeline d’étude
//! - derivee.rs  : dérivation structurelle (produit, quotient, chaîne)
//! - format.rs   : affichage des expressions + nombres “jolis”
//!
//! Aucun état global : chaque arbre est possédé par son appelant.

pub mod analyse;
pub mod derivee;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use analyse::parse;
pub use erreurs::{InvalidExpressionError, LexError, ParseError};
pub use eval::{etudier, DemarcheNoyau, Etude};
pub use expr::Expr;
pub use format::{format_nombre, render};
pub use trig::TrigKind;

/// Valeur de `expr` en `x` (NaN / ±∞ pour les cas limites, jamais d’erreur).
pub fn evaluate(expr: &Expr, x: f64) -> f64 {
    expr.evaluer(x)
}

/// d/dx de `expr`, sous forme d’un nouvel arbre indépendant.
pub fn differentiate(expr: &Expr) -> Expr {
    expr.deriver()
}
