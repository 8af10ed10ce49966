// src/noyau/expr.rs
//
// AST flottant à une variable (x).
// - Constant : nombre littéral
// - Variable : la variable libre x
// - Sum      : Σ termes (la soustraction = terme à coefficient négatif)
// - Product  : coeff × Π facteurs
// - Power    : coeff × base^exposant (exposant NUMÉRIQUE, jamais symbolique)
// - Quotient : coeff × numérateur / dénominateur
// - Trig     : coeff × kind(argument)
//
// IMPORTANT:
// - arbre strict : chaque nœud possède ses enfants (Box/Vec), pas de partage
// - immuable après construction : deriver() fabrique un NOUVEL arbre
// - constructeurs “intelligents” (somme/produit/puissance/...) : seulement le
//   repliement que le modèle à coefficients impose, aucune forme canonique
// - coefficients toujours finis : un repliement qui déborderait (1e200·1e200)
//   laisse le facteur séparé au lieu de produire inf

use super::trig::TrigKind;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Constant(f64),
    Variable,
    Sum {
        terms: Vec<Expr>,
    },
    Product {
        factors: Vec<Expr>,
        coeff: f64,
    },
    Power {
        base: Box<Expr>,
        exponent: f64,
        coeff: f64,
    },
    Quotient {
        numerator: Box<Expr>,
        denominator: Box<Expr>,
        coeff: f64,
    },
    Trig {
        kind: TrigKind,
        argument: Box<Expr>,
        coeff: f64,
    },
}

impl Expr {
    /* ------------------------ Constructeurs ------------------------ */

    /// Σ termes : aplatit les sommes imbriquées, retire les zéros littéraux.
    pub fn somme(termes: Vec<Expr>) -> Expr {
        let mut out: Vec<Expr> = Vec::with_capacity(termes.len());
        for t in termes {
            match t {
                Expr::Sum { terms } => out.extend(terms),
                Expr::Constant(c) if c == 0.0 => {}
                _ => out.push(t),
            }
        }

        match out.len() {
            0 => Expr::Constant(0.0),
            1 => out.pop().unwrap_or(Expr::Constant(0.0)),
            _ => Expr::Sum { terms: out },
        }
    }

    /// coeff × Π facteurs : les constantes et les coefficients des facteurs
    /// remontent dans `coeff`, les produits imbriqués sont aplatis.
    ///
    /// Un facteur dont le coefficient ferait déborder `coeff` reste un facteur
    /// à part entière (avec son coefficient).
    ///
    /// Un coefficient nul replie tout le produit en 0, même si un facteur a un
    /// pôle : `0 csc(x)` vaut 0 partout, y compris en x = 0.
    pub fn produit(facteurs: Vec<Expr>, coeff: f64) -> Expr {
        let mut c = coeff;
        let mut out: Vec<Expr> = Vec::with_capacity(facteurs.len());

        for f in facteurs {
            let (k, nu) = f.extraire_coeff();
            if !(c * k).is_finite() {
                out.push(match nu {
                    Some(e) => e.mise_a_l_echelle(k),
                    None => Expr::Constant(k),
                });
                continue;
            }
            c *= k;
            match nu {
                Some(Expr::Product { factors, .. }) => out.extend(factors),
                Some(e) => out.push(e),
                None => {}
            }
        }

        if c == 0.0 {
            return Expr::Constant(0.0);
        }

        match out.len() {
            0 => Expr::Constant(c),
            1 => match out.pop() {
                Some(seul) => seul.mise_a_l_echelle(c),
                None => Expr::Constant(c),
            },
            _ => Expr::Product {
                factors: out,
                coeff: c,
            },
        }
    }

    /// coeff × base^n : n = 0 => constante, n = 1 => base mise à l'échelle,
    /// base constante => repliée si le résultat est fini.
    pub fn puissance(base: Expr, exposant: f64, coeff: f64) -> Expr {
        if exposant == 0.0 {
            return Expr::Constant(coeff);
        }
        if exposant == 1.0 {
            return base.mise_a_l_echelle(coeff);
        }
        if let Expr::Constant(b) = base {
            let v = coeff * b.powf(exposant);
            if v.is_finite() {
                return Expr::Constant(v);
            }
        }
        Expr::Power {
            base: Box::new(base),
            exponent: exposant,
            coeff,
        }
    }

    pub fn quotient(numerateur: Expr, denominateur: Expr, coeff: f64) -> Expr {
        Expr::Quotient {
            numerator: Box::new(numerateur),
            denominator: Box::new(denominateur),
            coeff,
        }
    }

    pub fn trig(kind: TrigKind, argument: Expr, coeff: f64) -> Expr {
        Expr::Trig {
            kind,
            argument: Box::new(argument),
            coeff,
        }
    }

    /// k × self, sans nœud de multiplication supplémentaire
    /// (le moins unaire passe par ici avec k = -1).
    /// Si k × coefficient déborde : Product{[self], k}, coefficients intacts.
    pub fn mise_a_l_echelle(self, k: f64) -> Expr {
        if k == 1.0 {
            return self;
        }
        if !matches!(self, Expr::Sum { .. }) && !(k * self.coeff()).is_finite() {
            return Expr::Product {
                factors: vec![self],
                coeff: k,
            };
        }
        match self {
            Expr::Constant(v) => Expr::Constant(k * v),
            Expr::Variable => Expr::Product {
                factors: vec![Expr::Variable],
                coeff: k,
            },
            Expr::Sum { terms } => Expr::Sum {
                terms: terms.into_iter().map(|t| t.mise_a_l_echelle(k)).collect(),
            },
            Expr::Product { factors, coeff } => Expr::Product {
                factors,
                coeff: k * coeff,
            },
            Expr::Power {
                base,
                exponent,
                coeff,
            } => Expr::Power {
                base,
                exponent,
                coeff: k * coeff,
            },
            Expr::Quotient {
                numerator,
                denominator,
                coeff,
            } => Expr::Quotient {
                numerator,
                denominator,
                coeff: k * coeff,
            },
            Expr::Trig {
                kind,
                argument,
                coeff,
            } => Expr::Trig {
                kind,
                argument,
                coeff: k * coeff,
            },
        }
    }

    /// Sépare (coefficient, reste à coefficient 1).
    /// Constante => (valeur, None). Somme => (1, somme) (pas de coefficient propre).
    fn extraire_coeff(self) -> (f64, Option<Expr>) {
        match self {
            Expr::Constant(v) => (v, None),
            Expr::Variable | Expr::Sum { .. } => (1.0, Some(self)),
            Expr::Product { factors, coeff } => (coeff, Some(Expr::Product { factors, coeff: 1.0 })),
            Expr::Power {
                base,
                exponent,
                coeff,
            } => (
                coeff,
                Some(Expr::Power {
                    base,
                    exponent,
                    coeff: 1.0,
                }),
            ),
            Expr::Quotient {
                numerator,
                denominator,
                coeff,
            } => (
                coeff,
                Some(Expr::Quotient {
                    numerator,
                    denominator,
                    coeff: 1.0,
                }),
            ),
            Expr::Trig {
                kind,
                argument,
                coeff,
            } => (
                coeff,
                Some(Expr::Trig {
                    kind,
                    argument,
                    coeff: 1.0,
                }),
            ),
        }
    }

    /* ------------------------ Requêtes ------------------------ */

    /// Coefficient porté par le nœud (1 pour Variable/Sum, la valeur pour Constant).
    pub fn coeff(&self) -> f64 {
        match self {
            Expr::Constant(v) => *v,
            Expr::Variable | Expr::Sum { .. } => 1.0,
            Expr::Product { coeff, .. }
            | Expr::Power { coeff, .. }
            | Expr::Quotient { coeff, .. }
            | Expr::Trig { coeff, .. } => *coeff,
        }
    }

    /// Vrai si x apparaît quelque part dans l'arbre.
    pub fn contient_variable(&self) -> bool {
        match self {
            Expr::Constant(_) => false,
            Expr::Variable => true,
            Expr::Sum { terms } => terms.iter().any(Expr::contient_variable),
            Expr::Product { factors, .. } => factors.iter().any(Expr::contient_variable),
            Expr::Power { base, .. } => base.contient_variable(),
            Expr::Quotient {
                numerator,
                denominator,
                ..
            } => numerator.contient_variable() || denominator.contient_variable(),
            Expr::Trig { argument, .. } => argument.contient_variable(),
        }
    }

    /// Tous les coefficients (et constantes) sont finis.
    pub fn coefficients_finis(&self) -> bool {
        let ici = match self {
            Expr::Power { exponent, .. } => exponent.is_finite(),
            _ => true,
        };
        ici && self.coeff().is_finite()
            && match self {
                Expr::Constant(_) | Expr::Variable => true,
                Expr::Sum { terms } => terms.iter().all(Expr::coefficients_finis),
                Expr::Product { factors, .. } => factors.iter().all(Expr::coefficients_finis),
                Expr::Power { base, .. } => base.coefficients_finis(),
                Expr::Quotient {
                    numerator,
                    denominator,
                    ..
                } => numerator.coefficients_finis() && denominator.coefficients_finis(),
                Expr::Trig { argument, .. } => argument.coefficients_finis(),
            }
    }

    /// Nombre de nœuds (garde-fous des tests, démarche).
    pub fn taille(&self) -> usize {
        1 + match self {
            Expr::Constant(_) | Expr::Variable => 0,
            Expr::Sum { terms } => terms.iter().map(Expr::taille).sum(),
            Expr::Product { factors, .. } => factors.iter().map(Expr::taille).sum(),
            Expr::Power { base, .. } => base.taille(),
            Expr::Quotient {
                numerator,
                denominator,
                ..
            } => numerator.taille() + denominator.taille(),
            Expr::Trig { argument, .. } => argument.taille(),
        }
    }
}
