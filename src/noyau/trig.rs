// src/noyau/trig.rs
//
// Fonctions trigonométriques (circulaires + hyperboliques + réciproques)
// ----------------------------------------------------------------------
// - 24 genres, famille fermée
// - deux tables exhaustives (match) : évaluation + dérivée extérieure
// - réciproques (csc, sec, cot, csch, sech, coth) = 1/primaire => mêmes pôles
// - inverses hyperboliques par leurs formes logarithmiques

use super::expr::Expr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrigKind {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Arcsin,
    Arccos,
    Arctan,
    Arccsc,
    Arcsec,
    Arccot,
    Sinh,
    Cosh,
    Tanh,
    Csch,
    Sech,
    Coth,
    Arcsinh,
    Arccosh,
    Arctanh,
    Arccsch,
    Arcsech,
    Arccoth,
}

impl TrigKind {
    pub const TOUS: [TrigKind; 24] = [
        TrigKind::Sin,
        TrigKind::Cos,
        TrigKind::Tan,
        TrigKind::Csc,
        TrigKind::Sec,
        TrigKind::Cot,
        TrigKind::Arcsin,
        TrigKind::Arccos,
        TrigKind::Arctan,
        TrigKind::Arccsc,
        TrigKind::Arcsec,
        TrigKind::Arccot,
        TrigKind::Sinh,
        TrigKind::Cosh,
        TrigKind::Tanh,
        TrigKind::Csch,
        TrigKind::Sech,
        TrigKind::Coth,
        TrigKind::Arcsinh,
        TrigKind::Arccosh,
        TrigKind::Arctanh,
        TrigKind::Arccsch,
        TrigKind::Arcsech,
        TrigKind::Arccoth,
    ];

    pub fn nom(self) -> &'static str {
        use TrigKind::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Csc => "csc",
            Sec => "sec",
            Cot => "cot",
            Arcsin => "arcsin",
            Arccos => "arccos",
            Arctan => "arctan",
            Arccsc => "arccsc",
            Arcsec => "arcsec",
            Arccot => "arccot",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Csch => "csch",
            Sech => "sech",
            Coth => "coth",
            Arcsinh => "arcsinh",
            Arccosh => "arccosh",
            Arctanh => "arctanh",
            Arccsch => "arccsch",
            Arcsech => "arcsech",
            Arccoth => "arccoth",
        }
    }

    /// Reconnaît un nom de fonction (déjà en minuscules).
    pub fn depuis_nom(nom: &str) -> Option<TrigKind> {
        TrigKind::TOUS.iter().copied().find(|k| k.nom() == nom)
    }

    /// Valeur de la fonction en `y` (argument déjà évalué).
    /// Aucune erreur : hors domaine => NaN, pôle => ±∞ (IEEE-754).
    pub fn appliquer(self, y: f64) -> f64 {
        use TrigKind::*;
        match self {
            Sin => y.sin(),
            Cos => y.cos(),
            Tan => y.tan(),
            Csc => 1.0 / y.sin(),
            Sec => 1.0 / y.cos(),
            Cot => 1.0 / y.tan(),

            Arcsin => y.asin(),
            Arccos => y.acos(),
            Arctan => y.atan(),
            Arccsc => (1.0 / y).asin(),
            Arcsec => (1.0 / y).acos(),
            Arccot => (1.0 / y).atan(),

            Sinh => y.sinh(),
            Cosh => y.cosh(),
            Tanh => y.tanh(),
            Csch => 1.0 / y.sinh(),
            Sech => 1.0 / y.cosh(),
            Coth => 1.0 / y.tanh(),

            Arcsinh => (y + (y * y + 1.0).sqrt()).ln(),
            Arccosh => (y + (y * y - 1.0).sqrt()).ln(),
            Arctanh => 0.5 * ((1.0 + y) / (1.0 - y)).ln(),
            Arccsch => (1.0 / y + (1.0 / (y * y) + 1.0).sqrt()).ln(),
            Arcsech => (1.0 / y + (1.0 / (y * y) - 1.0).sqrt()).ln(),
            Arccoth => 0.5 * ((y + 1.0) / (y - 1.0)).ln(),
        }
    }

    /// Dérivée “extérieure” kind′(y), construite sur le MÊME argument `y`
    /// (jamais sur x nu). La règle de chaîne (× y′) est appliquée par l'appelant.
    pub fn derivee_exterieure(self, y: &Expr) -> Expr {
        use TrigKind::*;

        let t = |k: TrigKind| Expr::trig(k, y.clone(), 1.0);
        let carre = |e: Expr, c: f64| Expr::puissance(e, 2.0, c);
        let un_sur = |den: Expr, c: f64| Expr::quotient(Expr::Constant(1.0), den, c);
        // 1 ± y²  /  y² ± 1
        let y2 = || carre(y.clone(), 1.0);
        let un_moins_y2 = || Expr::somme(vec![Expr::Constant(1.0), carre(y.clone(), -1.0)]);
        let racine = |e: Expr| Expr::puissance(e, 0.5, 1.0);
        // (1/y² ± 1)^½ · y²
        let inv_y2 = || Expr::quotient(Expr::Constant(1.0), y2(), 1.0);
        let racine_inv_y2_plus = |k: f64, c: f64| {
            let interieur = Expr::somme(vec![inv_y2(), Expr::Constant(k)]);
            un_sur(Expr::produit(vec![racine(interieur), y2()], 1.0), c)
        };
        let un_moins_inv_y2_fois_y2 = |c: f64| {
            let interieur = Expr::somme(vec![
                Expr::Constant(1.0),
                Expr::quotient(Expr::Constant(1.0), y2(), -1.0),
            ]);
            un_sur(Expr::produit(vec![racine(interieur), y2()], 1.0), c)
        };

        match self {
            Sin => t(Cos),
            Cos => Expr::trig(Sin, y.clone(), -1.0),
            Tan => carre(t(Sec), 1.0),
            Csc => Expr::produit(vec![t(Csc), t(Cot)], -1.0),
            Sec => Expr::produit(vec![t(Sec), t(Tan)], 1.0),
            Cot => carre(t(Csc), -1.0),

            Arcsin => un_sur(racine(un_moins_y2()), 1.0),
            Arccos => un_sur(racine(un_moins_y2()), -1.0),
            Arctan => un_sur(Expr::somme(vec![Expr::Constant(1.0), y2()]), 1.0),
            Arccsc => un_moins_inv_y2_fois_y2(-1.0),
            Arcsec => un_moins_inv_y2_fois_y2(1.0),
            Arccot => un_sur(Expr::somme(vec![Expr::Constant(1.0), y2()]), -1.0),

            Sinh => t(Cosh),
            Cosh => t(Sinh),
            // sech², pas de retombée dans la règle de csch
            Tanh => carre(t(Sech), 1.0),
            Csch => Expr::produit(vec![t(Csch), t(Coth)], -1.0),
            Sech => Expr::produit(vec![t(Sech), t(Tanh)], -1.0),
            // -csch² (hyperbolique), pas -csc²
            Coth => carre(t(Csch), -1.0),

            Arcsinh => un_sur(racine(Expr::somme(vec![y2(), Expr::Constant(1.0)])), 1.0),
            Arccosh => un_sur(racine(Expr::somme(vec![y2(), Expr::Constant(-1.0)])), 1.0),
            Arctanh => un_sur(un_moins_y2(), 1.0),
            Arccsch => racine_inv_y2_plus(1.0, -1.0),
            Arcsech => racine_inv_y2_plus(-1.0, -1.0),
            Arccoth => un_sur(un_moins_y2(), 1.0),
        }
    }
}
