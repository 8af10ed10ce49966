//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état du traceur (entrée, point d’étude x0, résultats, erreur,
//! démarche, fenêtre de tracé) et offrir des opérations simples (C/CLR/AC) sans
//! logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur x0 et sur la fenêtre de tracé (anti-gel).

use crate::noyau::Expr;

/// Point d’étude par défaut.
pub const X0_DEFAUT: f64 = 1.0;

/// Garde-fou : |x0| et |bornes| ≤ BORNE_MAX.
pub const BORNE_MAX: f64 = 1.0e6;

/// Fenêtre de tracé par défaut [X_MIN, X_MAX].
pub const X_MIN_DEFAUT: f64 = -5.0;
pub const X_MAX_DEFAUT: f64 = 5.0;

/// Nombre d’échantillons par courbe.
pub const ECHANTILLONS: usize = 400;

/// Tracé : ordonnées hors de [-Y_LIMITE, Y_LIMITE] coupent la courbe (pôles).
pub const Y_LIMITE: f64 = 50.0;

/// Largeur minimale de la fenêtre (évite une fenêtre dégénérée).
const LARGEUR_MIN: f64 = 1.0e-3;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub expression: String,
    pub derivee: String,
    pub note: String,
}

/// Courbes étudiées (gardées pour le tracé, recalculé à chaque frame).
#[derive(Clone, Debug)]
pub struct Courbes {
    pub fonction: Expr,
    pub derivee: Expr,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub x0: f64,

    // --- sorties ---
    pub expression: String, // f(x) telle que relue
    pub derivee: String,    // f'(x)
    pub valeur: String,     // f(x0) (lecture “jolie”)
    pub pente: String,      // f'(x0)
    pub erreur: String,     // message d’erreur (si l’analyse échoue)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- tracé ---
    pub courbes: Option<Courbes>,
    pub x_min: f64,
    pub x_max: f64,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            x0: X0_DEFAUT,
            expression: String::new(),
            derivee: String::new(),
            valeur: String::new(),
            pente: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            courbes: None,
            x_min: X_MIN_DEFAUT,
            x_max: X_MAX_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + x0 et fenêtre par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.x0 = X0_DEFAUT;
        self.x_min = X_MIN_DEFAUT;
        self.x_max = X_MAX_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche + courbes (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.expression.clear();
        self.derivee.clear();
        self.valeur.clear();
        self.pente.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.courbes = None;
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE f, f' et les courbes (dernier résultat) : une faute de frappe
    ///   n’efface pas l’écran.
    /// - Les valeurs en x0 et la démarche sont coupées.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.valeur.clear();
        self.pente.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet.
    pub fn set_resultats(
        &mut self,
        valeur: impl Into<String>,
        pente: impl Into<String>,
        demarche: Demarche,
        courbes: Courbes,
    ) {
        self.erreur.clear();
        self.expression = demarche.expression.clone();
        self.derivee = demarche.derivee.clone();
        self.valeur = valeur.into();
        self.pente = pente.into();
        self.demarche = demarche;
        self.courbes = Some(courbes);
        self.focus_entree = true;
    }

    /// Garde-fou : x0 fini, borné.
    pub fn set_x0(&mut self, x0: f64) {
        self.x0 = if x0.is_finite() {
            x0.clamp(-BORNE_MAX, BORNE_MAX)
        } else {
            X0_DEFAUT
        };
        self.focus_entree = true;
    }

    /// Garde-fou : fenêtre finie, bornée, ordonnée, de largeur non nulle.
    pub fn set_fenetre(&mut self, x_min: f64, x_max: f64) {
        if !x_min.is_finite() || !x_max.is_finite() {
            self.x_min = X_MIN_DEFAUT;
            self.x_max = X_MAX_DEFAUT;
            return;
        }
        let a = x_min.clamp(-BORNE_MAX, BORNE_MAX);
        let b = x_max.clamp(-BORNE_MAX, BORNE_MAX);
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        self.x_min = a;
        self.x_max = if b - a < LARGEUR_MIN { a + LARGEUR_MIN } else { b };
    }

    /// Abscisses d’échantillonnage régulières sur [x_min, x_max] (bornes incluses).
    pub fn abscisses(&self) -> impl Iterator<Item = f64> + '_ {
        let pas = (self.x_max - self.x_min) / (ECHANTILLONS - 1) as f64;
        (0..ECHANTILLONS).map(move |i| self.x_min + pas * i as f64)
    }
}
