// src/noyau/format.rs
//
// Affichage des expressions (non canonique) + lecture “jolie” des nombres.
//
// Contrat de render():
// - Sum : termes joints par " + " / " - " selon le signe du terme rendu
// - Product/Power/Quotient/Trig : coefficient préfixé seulement s'il ≠ 1, "-" exactement s'il vaut -1
// - Trig : kind(argument)
// - parenthèses là où la relecture l'exige : parse(render(e)) s'évalue comme e

use num_rational::Rational64;
use num_traits::One;

use std::fmt;

use super::expr::Expr;

/* ------------------------ Nombres (forme relisible) ------------------------ */

/// Forme la plus courte qui se relit exactement (jamais de notation “e”).
fn format_f64(v: f64) -> String {
    format!("{v}")
}

fn commence_par_chiffre(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn entre_parentheses(s: String) -> String {
    format!("({s})")
}

/// Préfixe le coefficient : rien pour 1, "-" pour -1, sinon le nombre
/// (avec '*' si le corps commence lui-même par un chiffre : "2*1/x", pas "21/x").
fn avec_coeff(coeff: f64, corps: String) -> String {
    if coeff == 1.0 {
        corps
    } else if coeff == -1.0 {
        format!("-{corps}")
    } else if commence_par_chiffre(&corps) {
        format!("{}*{corps}", format_f64(coeff))
    } else {
        format!("{}{corps}", format_f64(coeff))
    }
}

/* ------------------------ Atomes (pas besoin de parenthèses) ------------------------ */

/// Base de puissance lisible sans parenthèses.
fn base_atomique(e: &Expr) -> bool {
    match e {
        Expr::Variable => true,
        Expr::Constant(v) => *v >= 0.0 && v.is_sign_positive(),
        Expr::Trig { coeff, .. } => *coeff == 1.0,
        _ => false,
    }
}

/// Dénominateur lisible sans parenthèses (le '^' lie plus fort que '/').
fn denominateur_atomique(e: &Expr) -> bool {
    match e {
        Expr::Power { base, coeff, .. } => *coeff == 1.0 && base_atomique(base),
        _ => base_atomique(e),
    }
}

fn rendre_base(e: &Expr) -> String {
    let s = render(e);
    if base_atomique(e) {
        s
    } else {
        entre_parentheses(s)
    }
}

fn rendre_facteur(e: &Expr) -> String {
    let s = render(e);
    if matches!(e, Expr::Sum { .. } | Expr::Quotient { .. }) || s.starts_with('-') {
        entre_parentheses(s)
    } else {
        s
    }
}

/* ------------------------ Rendu ------------------------ */

/// API publique : AST -> chaîne d'affichage.
pub fn render(e: &Expr) -> String {
    match e {
        Expr::Constant(v) => format_f64(*v),
        Expr::Variable => "x".to_string(),

        Expr::Sum { terms } => {
            let mut out = String::new();
            for (i, t) in terms.iter().enumerate() {
                let s = render(t);
                if i == 0 {
                    out.push_str(&s);
                } else if let Some(reste) = s.strip_prefix('-') {
                    out.push_str(" - ");
                    out.push_str(reste);
                } else {
                    out.push_str(" + ");
                    out.push_str(&s);
                }
            }
            out
        }

        Expr::Product { factors, coeff } => {
            let corps = factors
                .iter()
                .map(rendre_facteur)
                .collect::<Vec<_>>()
                .join("*");
            avec_coeff(*coeff, corps)
        }

        Expr::Power {
            base,
            exponent,
            coeff,
        } => avec_coeff(
            *coeff,
            format!("{}^{}", rendre_base(base), format_f64(*exponent)),
        ),

        Expr::Quotient {
            numerator,
            denominator,
            coeff,
        } => {
            let num = render(numerator);
            let num = if matches!(**numerator, Expr::Sum { .. })
                || (*coeff != 1.0 && num.starts_with('-'))
            {
                entre_parentheses(num)
            } else {
                num
            };
            let den = render(denominator);
            let den = if denominateur_atomique(denominator) {
                den
            } else {
                entre_parentheses(den)
            };
            avec_coeff(*coeff, format!("{num}/{den}"))
        }

        Expr::Trig {
            kind,
            argument,
            coeff,
        } => avec_coeff(*coeff, format!("{}({})", kind.nom(), render(argument))),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/* ------------------------ Étiquettes (valeurs affichées) ------------------------ */

fn format_rat_pretty(r: &Rational64) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

/// Cherche n/d (d ≤ max_den) égal à v à 1e-9 près.
fn fraction_proche(v: f64, max_den: i64) -> Option<Rational64> {
    if v.abs() > 1e12 {
        return None;
    }
    (2..=max_den).find_map(|d| {
        let n = (v * d as f64).round();
        if (n / d as f64 - v).abs() < 1e-9 {
            Some(Rational64::new(n as i64, d))
        } else {
            None
        }
    })
}

/// Lecture “jolie” d'une valeur numérique (étiquettes, résultats):
/// - entier si à moins de 1e-7 d'un entier (gomme 1.0000000000001)
/// - fraction à petit dénominateur (≤ 100) si exacte à 1e-9
/// - sinon 6 décimales, zéros finaux retirés
/// - NaN => "indéfini", ±∞ => "+∞" / "-∞"
pub fn format_nombre(v: f64) -> String {
    if v.is_nan() {
        return "indéfini".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+∞" } else { "-∞" }.to_string();
    }

    let r = v.round();
    if (r - v).abs() < 1e-7 && r.abs() < 1e15 {
        return format!("{}", r as i64);
    }

    if let Some(q) = fraction_proche(v, 100) {
        return format_rat_pretty(&q);
    }

    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}
