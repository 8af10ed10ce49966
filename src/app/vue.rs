// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter étudie, Backspace efface (quand le champ est focus)
// - Tactile : boutons des 24 fonctions, focus redonné après clic (focus_entree)
// - Tracé de f et f' au painter (pas de dépendance de tracé)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Les courbes se coupent sur NaN/±∞ et hors [-Y_LIMITE, Y_LIMITE]

use eframe::egui;
use log::{debug, info};

use crate::noyau::{etudier, evaluate, format_nombre, ParseError, TrigKind};

use super::etat::{AppCalc, Courbes, Demarche, Y_LIMITE};

/// Couleurs des courbes (f, f').
const COULEUR_F: egui::Color32 = egui::Color32::from_rgb(70, 130, 220);
const COULEUR_D: egui::Color32 = egui::Color32::from_rgb(220, 110, 60);

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Traceur symbolique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                self.ui_trace(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("f(x) =");

        // IMPORTANT : id stable + focus contrôlé
        // (copie avant TextEdit : Backspace y est déjà appliqué une fois)
        let avant = self.entree.clone();
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: x^2 sin(x), 1/(x^2 + 1), arcsinh(2x) - sqrt(x)")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter étudie (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.etudier_via_noyau();
        }

        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
        if resp.has_focus() && backspace {
            self.completer_backspace(avant);
        }

        ui.add_space(6.0);

        // Actions + point d’étude
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultats + erreur + démarche + courbes",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("x0 :");
            let mut x0 = self.x0;
            let resp = ui.add(egui::DragValue::new(&mut x0).speed(0.05).max_decimals(6));
            if resp.changed() {
                self.set_x0(x0);
                // étude relancée seulement si un résultat est déjà affiché
                if self.courbes.is_some() {
                    self.etudier_via_noyau();
                }
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("d/dx"));
            if eq.clicked() {
                self.etudier_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Touches rapides
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "x", "x", InsertKind::Word);
            self.bouton_insert(ui, "pi", "pi", InsertKind::Word);
            self.bouton_insert(ui, "sqrt", "sqrt(", InsertKind::Func);
        });

        // Les 24 fonctions (6 par ligne : circulaires, réciproques, hyperboliques...)
        egui::Grid::new("fonctions_trig")
            .num_columns(6)
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for (i, k) in TrigKind::TOUS.iter().enumerate() {
                    let appel = format!("{}(", k.nom());
                    self.bouton_insert(ui, k.nom(), &appel, InsertKind::Func);
                    if i % 6 == 5 {
                        ui.end_row();
                    }
                }
            });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    /// Backspace “intelligent” : retire d’un coup un appel de fonction ("arcsinh(", "pi", ...).
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        match motif_final(&self.entree) {
            Some(n) => {
                let reste = self.entree.len() - n;
                self.entree.truncate(reste);
            }
            None => {
                self.entree.pop();
            }
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    /// Après un Backspace clavier (déjà appliqué par TextEdit sur un caractère) :
    /// complète l’effacement seulement si `avant` se terminait par un motif entier.
    fn completer_backspace(&mut self, avant: String) {
        let mut attendu = avant.clone();
        attendu.pop();
        let fin_effacee = self.entree == attendu;

        if fin_effacee && motif_final(avant.trim_end()).is_some() {
            self.entree = avant;
            self.backspace_entree();
        }
        self.focus_entree = true;
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("f(x) :");
        Self::champ_monospace(ui, "f_out", &self.expression, 1);

        ui.add_space(4.0);
        ui.colored_label(COULEUR_D, "f'(x) :");
        Self::champ_monospace(ui, "d_out", &self.derivee, 2);

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let x0 = format_nombre(self.x0);
            ui.monospace(format!("f({x0}) = {}", self.valeur));
            ui.separator();
            ui.monospace(format!("f'({x0}) = {}", self.pente));
        });
    }

    fn ui_trace(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Fenêtre :");
            let (mut a, mut b) = (self.x_min, self.x_max);
            let ra = ui.add(egui::DragValue::new(&mut a).speed(0.1).prefix("x min "));
            let rb = ui.add(egui::DragValue::new(&mut b).speed(0.1).prefix("x max "));
            if ra.changed() || rb.changed() {
                self.set_fenetre(a, b);
            }
            ui.separator();
            ui.colored_label(COULEUR_F, "— f");
            ui.colored_label(COULEUR_D, "— f'");
        });

        let taille = egui::vec2(ui.available_width(), 260.0);
        let (resp, painter) = ui.allocate_painter(taille, egui::Sense::hover());
        let rect = resp.rect;
        painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        let Some(courbes) = &self.courbes else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "aucune courbe",
                egui::FontId::monospace(12.0),
                ui.visuals().weak_text_color(),
            );
            return;
        };

        let xs: Vec<f64> = self.abscisses().collect();
        let f: Vec<f64> = xs.iter().map(|&x| evaluate(&courbes.fonction, x)).collect();
        let d: Vec<f64> = xs.iter().map(|&x| evaluate(&courbes.derivee, x)).collect();

        let (y_min, y_max) = plage_y(f.iter().chain(d.iter()).copied());
        let vers_ecran = |x: f64, y: f64| {
            let u = (x - self.x_min) / (self.x_max - self.x_min);
            let v = (y - y_min) / (y_max - y_min);
            egui::pos2(
                rect.left() + u as f32 * rect.width(),
                rect.bottom() - v as f32 * rect.height(),
            )
        };

        // axes (s’ils sont dans la fenêtre)
        let axe = egui::Stroke::new(1.0, ui.visuals().weak_text_color());
        if y_min <= 0.0 && 0.0 <= y_max {
            painter.line_segment(
                [vers_ecran(self.x_min, 0.0), vers_ecran(self.x_max, 0.0)],
                axe,
            );
        }
        if self.x_min <= 0.0 && 0.0 <= self.x_max {
            painter.line_segment([vers_ecran(0.0, y_min), vers_ecran(0.0, y_max)], axe);
        }

        for (ys, couleur) in [(&f, COULEUR_F), (&d, COULEUR_D)] {
            for morceau in morceaux(&xs, ys) {
                let pts: Vec<egui::Pos2> = morceau.iter().map(|&(x, y)| vers_ecran(x, y)).collect();
                painter.add(egui::Shape::line(pts, egui::Stroke::new(1.5, couleur)));
            }
        }

        // point d’étude
        let y0 = evaluate(&courbes.fonction, self.x0);
        let visible = (self.x_min..=self.x_max).contains(&self.x0);
        if y0.is_finite() && visible && (y_min..=y_max).contains(&y0) {
            painter.circle_filled(vers_ecran(self.x0, y0), 3.5, COULEUR_F);
        }

        painter.text(
            rect.left_top() + egui::vec2(4.0, 2.0),
            egui::Align2::LEFT_TOP,
            format!("y ∈ [{}, {}]", format_nombre(y_min), format_nombre(y_max)),
            egui::FontId::monospace(11.0),
            ui.visuals().weak_text_color(),
        );
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "f(x)", "demarche_expression", &self.demarche.expression);
                Self::champ_demarche(ui, "f'(x)", "demarche_derivee", &self.demarche.derivee);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([58.0, 26.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen | InsertKind::Func => {
                // espace après un identifiant : "x sin(" et non "xsin("
                let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                if let Some(c) = last {
                    if c.is_ascii_alphabetic() || c == ')' {
                        self.entree.push(' ');
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Word => {
                // "2x" reste collé, "x x" / "pi x" séparés
                if !self.entree.is_empty() && !self.entree.ends_with(char::is_whitespace) {
                    let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                    if let Some(c) = last {
                        if c.is_ascii_alphabetic() || c == ')' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Étudie f via le noyau, puis dépose f, f', f(x0), f'(x0) et la démarche dans l’état UI.
    fn etudier_via_noyau(&mut self) {
        let s = self.entree.trim().to_string();
        debug!("étude demandée: {s:?} en x0 = {}", self.x0);

        match etudier(&s, self.x0) {
            Ok(e) => {
                let d_ui = Demarche {
                    jetons: e.demarche.jetons,
                    expression: e.demarche.expression,
                    derivee: e.demarche.derivee,
                    note: e.demarche.note,
                };
                self.set_resultats(
                    format_nombre(e.valeur),
                    format_nombre(e.pente),
                    d_ui,
                    Courbes {
                        fonction: e.fonction,
                        derivee: e.derivee,
                    },
                );
            }
            // entrée vide : bénin, on efface seulement l’écran
            Err(ParseError::Vide) => self.clear_resultats(),
            Err(err) => {
                info!("étude refusée pour {s:?}: {err}");
                self.set_erreur(err.to_string());
            }
        }
        self.focus_entree = true;
    }
}

/// Longueur du motif multi-caractères qui termine `s` (le plus long d’abord :
/// "arcsinh(" avant "sinh(").
fn motif_final(s: &str) -> Option<usize> {
    let mut motifs: Vec<String> = TrigKind::TOUS
        .iter()
        .map(|k| format!("{}(", k.nom()))
        .chain(["sqrt(".to_string(), "pi".to_string()])
        .collect();
    motifs.sort_by_key(|m| std::cmp::Reverse(m.len()));
    motifs.into_iter().find(|m| s.ends_with(m.as_str())).map(|m| m.len())
}

/// Plage verticale commune : valeurs finies bornées à ±Y_LIMITE, jamais dégénérée.
fn plage_y(ys: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = ys
        .filter(|y| y.is_finite() && y.abs() <= Y_LIMITE)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !lo.is_finite() {
        return (-1.0, 1.0);
    }
    if hi - lo < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    let marge = 0.05 * (hi - lo);
    (lo - marge, hi + marge)
}

/// Découpe une courbe échantillonnée en morceaux continus (coupure sur NaN/±∞/hors borne).
fn morceaux(xs: &[f64], ys: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut out: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut courant: Vec<(f64, f64)> = Vec::new();

    for (&x, &y) in xs.iter().zip(ys) {
        if y.is_finite() && y.abs() <= Y_LIMITE {
            courant.push((x, y));
        } else if !courant.is_empty() {
            out.push(std::mem::take(&mut courant));
        }
    }
    if !courant.is_empty() {
        out.push(courant);
    }

    // un point isolé ne se trace pas en ligne
    out.retain(|m| m.len() >= 2);
    out
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
