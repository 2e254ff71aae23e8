//! Calculatrice+ : calculatrice de bureau (egui) sur un noyau d’évaluation sûr.
//!
//! - `noyau` : tokenize -> RPN -> arbre -> f64, sans état global
//! - `app`   : état UI (mémoire, historique, devises, graphe) + vue egui

pub mod app;
pub mod noyau;
