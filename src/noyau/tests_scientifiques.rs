//! Tests scientifiques (campagne) : scénarios + invariants numériques.
//!
//! Notes :
//! - La dérivée symbolique est vérifiée contre la différence centrée
//!   (f(x+h) - f(x-h)) / 2h, loin des singularités de f.
//! - La relecture parse(render(parse(s))) doit s'évaluer comme parse(s) :
//!   le texte peut dériver, pas la valeur.
//! - Règles trig à risque (tanh, coth, sech, arcsech/arccoth) : chacune a
//!   son test nommé plus bas.

use std::f64::consts::{FRAC_PI_2, PI};

use super::{differentiate, evaluate, parse, render, Expr, InvalidExpressionError, ParseError};
use super::trig::TrigKind;

fn p(s: &str) -> Expr {
    parse(s).unwrap_or_else(|e| panic!("parse({s:?}) erreur: {e}"))
}

fn proche_rel(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= tol * (1.0 + b.abs())
}

fn assert_proche(a: f64, b: f64, contexte: &str) {
    assert!(proche_rel(a, b, 1e-9), "{contexte}: attendu {b}, obtenu {a}");
}

fn difference_centree(f: &Expr, x: f64, h: f64) -> f64 {
    (evaluate(f, x + h) - evaluate(f, x - h)) / (2.0 * h)
}

fn verifier_derivee(s: &str, points: &[f64]) {
    let f = p(s);
    let d = differentiate(&f);
    for &x in points {
        let num = difference_centree(&f, x, 1e-5);
        let sym = evaluate(&d, x);
        assert!(
            proche_rel(sym, num, 1e-6),
            "f = {s}, f' = {d}, x = {x}: symbolique {sym}, numérique {num}"
        );
    }
}

/// Points loin des pôles / dans le domaine réel de chaque genre.
fn points_domaine(k: TrigKind) -> &'static [f64] {
    use TrigKind::*;
    match k {
        Arcsin | Arccos | Arctanh => &[-0.5, 0.2, 0.6],
        Arccsc | Arcsec | Arccoth => &[-3.0, 1.5, 2.0],
        Arccosh => &[1.5, 2.0, 3.0],
        Arcsech => &[0.2, 0.5, 0.8],
        Arccsch => &[-1.5, 0.5, 2.0],
        _ => &[0.3, 0.7, 1.2],
    }
}

/* ------------------------ Scénarios concrets ------------------------ */

#[test]
fn sci_x_carre() {
    let f = p("x^2");
    let d = differentiate(&f);
    assert_eq!(render(&d), "2x");
    assert_proche(evaluate(&f, 3.0), 9.0, "x^2 en 3");
    assert_proche(evaluate(&d, 3.0), 6.0, "(x^2)' en 3");
}

#[test]
fn sci_sinus() {
    let d = differentiate(&p("sin(x)"));
    assert_proche(evaluate(&d, 0.0), 1.0, "cos(0)");
    assert!(evaluate(&d, FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn sci_un_sur_x() {
    let f = p("1/x");
    assert!(matches!(
        f,
        Expr::Quotient { ref numerator, .. } if **numerator == Expr::Constant(1.0)
    ));
    assert_proche(evaluate(&differentiate(&f), 2.0), -0.25, "(1/x)' en 2");
}

#[test]
fn sci_arcsin() {
    let f = p("arcsin(x)");
    assert_proche(evaluate(&differentiate(&f), 0.0), 1.0, "arcsin'(0)");
    assert!(evaluate(&f, 2.0).is_nan());
}

/* ------------------------ Évaluation de référence ------------------------ */

#[test]
fn sci_evaluation_reference() {
    let cas: [(&str, fn(f64) -> f64); 8] = [
        ("3x^2 - 2x + 1", |x| 3.0 * x * x - 2.0 * x + 1.0),
        ("x sin(x)", |x| x * x.sin()),
        ("(x+1)(x-1)", |x| x * x - 1.0),
        ("1/(x^2 + 1)", |x| 1.0 / (x * x + 1.0)),
        ("2cos(3x) - sinh(x)/2", |x| 2.0 * (3.0 * x).cos() - x.sinh() / 2.0),
        ("sqrt(x^2 + 4)", |x| (x * x + 4.0).sqrt()),
        ("-x^3 + pi", |x| -(x * x * x) + PI),
        ("arctan(x)^2", |x| x.atan().powi(2)),
    ];
    for (s, reference) in cas {
        let f = p(s);
        for x in [-2.0, -0.5, 0.0, 0.75, 3.0] {
            assert_proche(evaluate(&f, x), reference(x), &format!("{s} en {x}"));
        }
    }
}

/* ------------------------ Dérivées (différences finies) ------------------------ */

#[test]
fn sci_derivees_24_genres() {
    for k in TrigKind::TOUS {
        let pts = points_domaine(k);
        verifier_derivee(&format!("{}(x)", k.nom()), pts);

        // même règle sous une composition : k(x/2) évaluée en 2p
        let pts2: Vec<f64> = pts.iter().map(|v| 2.0 * v).collect();
        verifier_derivee(&format!("3{}(0.5x)", k.nom()), &pts2);
    }
}

#[test]
fn sci_derivees_compositions() {
    let pts = [0.4, 1.1, 2.3];
    for s in [
        "x^3 - 4x^2 + x - 7",
        "x sin(x) cos(x)",
        "sin(x^2)",
        "cos(sin(x))",
        "(x^2 + 1)^0.5",
        "x/(x^2 + 1)",
        "(sin(x) + 2)/(cos(x) + 2)",
        "tan(x/3)^2",
        "arctan(x^2) - x arcsinh(x)",
        "3/(x + 1)^2",
        "sqrt(x) sinh(x)",
        "-2x^-1",
    ] {
        verifier_derivee(s, &pts);
    }
}

#[test]
fn sci_derivees_secondes() {
    // f'' comparée à la différence centrée de f'
    for s in ["sin(x) x^2", "1/x", "arctan(x)", "cosh(2x)"] {
        let d1 = differentiate(&p(s));
        let d2 = differentiate(&d1);
        for x in [0.5, 1.5] {
            let num = difference_centree(&d1, x, 1e-5);
            assert!(proche_rel(evaluate(&d2, x), num, 1e-5), "{s}'' en {x}");
        }
    }
}

#[test]
fn sci_tolerance_diminue_avec_h() {
    let f = p("x^3 sin(x)");
    let d = differentiate(&f);
    let exact = evaluate(&d, 1.0);
    let e_grand = (difference_centree(&f, 1.0, 1e-2) - exact).abs();
    let e_petit = (difference_centree(&f, 1.0, 1e-4) - exact).abs();
    assert!(e_petit < e_grand, "{e_petit} !< {e_grand}");
}

#[test]
fn sci_regles_sur_l_argument() {
    // arcsin(2x)' = 2/√(1-4x²)
    let d = differentiate(&p("arcsin(2x)"));
    assert_proche(evaluate(&d, 0.25), 2.0 / 0.75_f64.sqrt(), "arcsin(2x)'");
    // arccosh(x^2)' = 2x/√(x^4-1)
    let d = differentiate(&p("arccosh(x^2)"));
    assert_proche(evaluate(&d, 2.0), 4.0 / 15.0_f64.sqrt(), "arccosh(x^2)'");
}

/* ------------------------ Règles corrigées (choix explicite) ------------------------ */

#[test]
fn sci_tanh_sans_retombee_dans_csch() {
    // tanh' = sech² (et non -csch·coth)
    let d = differentiate(&p("tanh(x)"));
    let x: f64 = 0.5;
    assert_proche(evaluate(&d, x), 1.0 / x.cosh().powi(2), "tanh'");
    assert!(!proche_rel(evaluate(&d, x), -1.0 / (x.sinh() * x.tanh()), 1e-3));
}

#[test]
fn sci_coth_utilise_csch_hyperbolique() {
    // coth' = -csch² (et non -csc²)
    let d = differentiate(&p("coth(x)"));
    let x: f64 = 0.5;
    assert_proche(evaluate(&d, x), -1.0 / x.sinh().powi(2), "coth'");
    assert!(!proche_rel(evaluate(&d, x), -1.0 / x.sin().powi(2), 1e-3));
}

#[test]
fn sci_sech_arcsech_arccoth_signes() {
    let x: f64 = 0.5;
    let d = differentiate(&p("sech(x)"));
    assert_proche(evaluate(&d, x), -x.tanh() / x.cosh(), "sech'");

    let d = differentiate(&p("arcsech(x)"));
    assert_proche(evaluate(&d, x), -1.0 / (x * (1.0 - x * x).sqrt()), "arcsech'");

    let d = differentiate(&p("arccoth(x)"));
    assert_proche(evaluate(&d, 3.0), 1.0 / (1.0 - 9.0), "arccoth'");
}

/* ------------------------ Relecture + multiplication implicite ------------------------ */

#[test]
fn sci_relecture_idempotente() {
    let exprs = [
        "x^2",
        "2x - 3",
        "-x^2 + 1/x",
        "x sin(x) cos(x)",
        "(x+1)(x-1)",
        "2/(3x)",
        "1/x^2",
        "sqrt(x^2 + 1)",
        "arcsin(x/2) - 0.25arccot(x)",
        "-(x + 1)^3",
        "sec(x)^2 tan(x)",
        "5/(x - 1)/(x + 2)",
        "x^-0.5",
        "(2x)^2",
        "-1/x",
        "0.1x + 0.2",
    ];
    let pts = [-1.7, -0.3, 0.6, 1.9, 4.2];
    for s in exprs {
        let f = p(s);
        let relu = p(&render(&f));
        let d = differentiate(&f);
        let d_relu = p(&render(&d));
        for x in pts {
            assert!(
                proche_rel(evaluate(&relu, x), evaluate(&f, x), 1e-12),
                "{s} -> {} en {x}",
                render(&f)
            );
            assert!(
                proche_rel(evaluate(&d_relu, x), evaluate(&d, x), 1e-12),
                "({s})' -> {} en {x}",
                render(&d)
            );
        }
    }
}

#[test]
fn sci_multiplication_implicite_equivalente() {
    let a = p("2x");
    let b = p("2*x");
    let c = p("2 x");
    for x in [-3.0, -0.1, 0.0, 2.5, 1e6] {
        assert_eq!(evaluate(&a, x), evaluate(&b, x));
        assert_eq!(evaluate(&a, x), evaluate(&c, x));
    }
    let a = p("(x+1)(x-1)");
    let b = p("(x+1)*(x-1)");
    assert_eq!(evaluate(&a, 3.0), evaluate(&b, 3.0));
}

/* ------------------------ Échecs d'analyse ------------------------ */

#[test]
fn sci_echecs() {
    assert!(parse("").unwrap_err().est_vide());
    assert!(matches!(parse("sin(x"), Err(ParseError::Invalide(_))));
    assert!(matches!(parse("x++1"), Err(ParseError::Invalide(_))));
    assert!(matches!(
        parse("x^x"),
        Err(ParseError::Invalide(InvalidExpressionError::ExposantNonConstant { .. }))
    ));
}

#[test]
fn sci_cas_limites_numeriques_sans_erreur() {
    // valeurs IEEE, jamais de panique
    assert!(evaluate(&p("tan(x)"), FRAC_PI_2).abs() > 1e15);
    assert!(evaluate(&p("csc(x)"), 0.0).is_infinite());
    assert!(evaluate(&p("arccosh(x)"), 0.0).is_nan());
    assert!(evaluate(&p("x^0.5"), -1.0).is_nan());
    assert!(evaluate(&differentiate(&p("arcsin(x)")), 1.0).is_infinite());
}
