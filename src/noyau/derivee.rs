// src/noyau/derivee.rs
//
// Dérivation symbolique : transformation structurelle AST -> nouvel AST.
// - aucune hypothèse “argument == x” : tout passe par la règle de chaîne
// - l'entrée n'est jamais modifiée (on clone les sous-arbres nécessaires)
// - la table des 24 règles trig vit dans trig.rs (match exhaustif)

use log::trace;

use super::expr::Expr;

impl Expr {
    /// d/dx de l'expression.
    pub fn deriver(&self) -> Expr {
        let d = match self {
            Expr::Constant(_) => Expr::Constant(0.0),
            Expr::Variable => Expr::Constant(1.0),

            // linéarité
            Expr::Sum { terms } => Expr::somme(terms.iter().map(Expr::deriver).collect()),

            // règle du produit généralisée : Σ_i f_i' · Π_{j≠i} f_j
            Expr::Product { factors, coeff } => {
                let termes = (0..factors.len())
                    .map(|i| {
                        let facteurs = factors
                            .iter()
                            .enumerate()
                            .map(|(j, f)| if i == j { f.deriver() } else { f.clone() })
                            .collect();
                        Expr::produit(facteurs, 1.0)
                    })
                    .collect();
                Expr::somme(termes).mise_a_l_echelle(*coeff)
            }

            // coeff·n·base^(n-1)·base'
            Expr::Power {
                base,
                exponent,
                coeff,
            } => {
                // n séparé puis replié par produit() : coeff·n ne peut pas déborder en inf
                let exterieur = Expr::produit(
                    vec![
                        Expr::Constant(*exponent),
                        Expr::puissance((**base).clone(), exponent - 1.0, *coeff),
                    ],
                    1.0,
                );
                regle_de_chaine(exterieur, base, 1.0)
            }

            // coeff·(num'·den - num·den')/den²
            Expr::Quotient {
                numerator,
                denominator,
                coeff,
            } => {
                let num = numerator.as_ref();
                let den = denominator.as_ref();
                let haut = Expr::somme(vec![
                    Expr::produit(vec![num.deriver(), den.clone()], 1.0),
                    Expr::produit(vec![num.clone(), den.deriver()], -1.0),
                ]);
                if matches!(haut, Expr::Constant(c) if c == 0.0) {
                    return Expr::Constant(0.0);
                }
                Expr::quotient(haut, Expr::puissance(den.clone(), 2.0, 1.0), *coeff)
            }

            // coeff·kind'(arg)·arg'
            Expr::Trig {
                kind,
                argument,
                coeff,
            } => regle_de_chaine(kind.derivee_exterieure(argument), argument, *coeff),
        };

        trace!("d/dx [{self}] = {d}");
        d
    }
}

/// Règle de chaîne : coeff · externe · (d/dx interieur).
fn regle_de_chaine(externe: Expr, interieur: &Expr, coeff: f64) -> Expr {
    Expr::produit(vec![externe, interieur.deriver()], coeff)
}
