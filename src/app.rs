// src/app.rs
//
// Calculatrice+ : module App (racine)
// ---------------------------------
// Rôle:
// - Déclarer les sous-modules (état, vue, mémoire, historique, devises)
// - Ré-exporter AppCalc (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - La gestion Enter est faite dans vue.rs (quand le champ a le focus).

pub mod devises;
pub mod etat;
pub mod historique;
pub mod memoire;
pub mod vue;

// Ré-export pratique : `use calculatrice_plus::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourci clavier global minimal (safe natif + web) :
        // ESC = effacer seulement l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
