// src/app/vue.rs
//
// Vue (UI egui), natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Panneaux repliables : historique, devises, graphe (tableau), démarche
//
// Note :
// - Toute la logique est dans etat.rs ; ici on ne fait qu’afficher et router les clics.

use eframe::egui;

use super::devises::Devise;
use super::etat::{AppCalc, GRAPHE_X_MAX, GRAPHE_X_MIN};
use crate::noyau::format_resultat;

/// Lignes max du tableau de points (sous-échantillonné au-delà).
const LIGNES_GRAPHE: usize = 25;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice+");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
                self.ui_devises(ui);
                self.ui_graphe(ui);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (1+2)*3, sin90, sqrt(2)/2, x*x pour le graphe")
                .id_source("entree_edit")
                .font(egui::TextStyle::Heading),
        );

        // Après un clic bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.calculer();
        }

        if !self.resultat.is_empty() {
            ui.monospace(format!("= {}", self.resultat));
        }

        ui.add_space(6.0);

        // Mémoire + effacement
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);

            ui.separator();

            self.bouton_action(ui, "M+", "Ajoute l’entrée à la mémoire", Action::MemoirePlus);
            self.bouton_action(ui, "M-", "Soustrait l’entrée de la mémoire", Action::MemoireMoins);
            self.bouton_action(ui, "MR", "Rappelle la mémoire", Action::MemoireRappel);
            self.bouton_action(ui, "MC", "Efface la mémoire", Action::MemoireEffacer);
        });

        ui.add_space(6.0);

        // Fonctions (avancé)
        ui.horizontal_wrapped(|ui| {
            for f in ["sin", "cos", "tan", "log", "exp", "√"] {
                self.bouton_insert(ui, f, f);
            }
            self.bouton_insert(ui, "x", "x");

            ui.separator();

            self.bouton_action(ui, "Graphe", "Échantillonne l’entrée en x", Action::Tracer);
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
        if !self.info.is_empty() {
            ui.add_space(6.0);
            ui.label(&self.info);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [
                    ["7", "8", "9", "/"],
                    ["4", "5", "6", "*"],
                    ["1", "2", "3", "-"],
                    ["0", ".", "(", ")"],
                ] {
                    for touche in ligne {
                        self.bouton_insert(ui, touche, touche);
                    }
                    ui.end_row();
                }

                self.bouton_insert(ui, "+", "+");
                ui.label("");
                ui.label("");
                self.bouton_action(ui, "=", "Calculer", Action::Calculer);
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup les noms de fonctions ("sqrt", "sin", etc.).
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire tokens connus
        for pat in ["sqrt", "sin", "cos", "tan", "log", "exp"] {
            if self.entree.ends_with(pat) {
                for _ in 0..pat.chars().count() {
                    self.entree.pop();
                }
                return;
            }
        }

        // Sinon : un caractère
        self.entree.pop();
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.monospace("vide");
                }
                for entree in self.historique.iter() {
                    ui.monospace(entree.to_string());
                }
            });
    }

    fn ui_devises(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Convertisseur de devises")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Montant (USD) :");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.montant_devise)
                            .desired_width(120.0)
                            .id_source("montant_devise"),
                    );
                });

                ui.horizontal(|ui| {
                    egui::ComboBox::from_label("Vers")
                        .selected_text(self.devise.code())
                        .show_ui(ui, |ui| {
                            for d in Devise::TOUTES {
                                ui.selectable_value(
                                    &mut self.devise,
                                    d,
                                    format!("{} : {}", d.code(), d.nom()),
                                );
                            }
                        });

                    if ui.button("Convertir").clicked() {
                        self.convertir_devise();
                    }
                });

                if !self.conversion.is_empty() {
                    ui.monospace(&self.conversion);
                }
            });
    }

    fn ui_graphe(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Graphe")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("x ∈ [{GRAPHE_X_MIN}, {GRAPHE_X_MAX}]"));
                    let mut n = self.points_graphe as u32;
                    let resp = ui.add(
                        egui::DragValue::new(&mut n)
                            .speed(10)
                            .range(2..=4000)
                            .suffix(" points"),
                    );
                    if resp.changed() {
                        self.set_points_graphe(n as usize);
                    }
                });

                let Some(g) = &self.graphe else {
                    ui.monospace("aucun graphe (bouton « Graphe »)");
                    return;
                };

                ui.monospace(format!("y = {}", g.expression));
                let plage = match (g.resume.y_min, g.resume.y_max) {
                    (Some(a), Some(b)) => {
                        format!("y ∈ [{}, {}]", format_resultat(a), format_resultat(b))
                    }
                    _ => "aucun point valide".to_string(),
                };
                ui.monospace(format!(
                    "{} points valides, {} en échec, {plage}",
                    g.resume.valides, g.resume.echecs
                ));

                let pas = g.points.len().div_ceil(LIGNES_GRAPHE).max(1);
                egui::Grid::new("table_graphe")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("x");
                        ui.strong("y");
                        ui.end_row();

                        for (x, y) in g.points.iter().step_by(pas) {
                            ui.monospace(format_resultat(*x));
                            match y {
                                Ok(v) => ui.monospace(format_resultat(*v)),
                                Err(e) => ui.colored_label(ui.visuals().error_fg_color, e.to_string()),
                            };
                            ui.end_row();
                        }
                    });
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));

        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
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
                Action::Backspace => self.backspace_entree(),
                Action::Calculer => self.calculer(),
                Action::MemoirePlus => self.memoire_plus(),
                Action::MemoireMoins => self.memoire_moins(),
                Action::MemoireRappel => self.memoire_rappel(),
                Action::MemoireEffacer => self.memoire_effacer(),
                Action::Tracer => self.tracer(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    Backspace,
    Calculer,
    MemoirePlus,
    MemoireMoins,
    MemoireRappel,
    MemoireEffacer,
    Tracer,
}
