//! Noyau d’évaluation sûr (sans évaluation générique du texte saisi)
//!
//! Organisation interne :
//! - erreur.rs   : taxonomie ErreurCalc (lexicale, syntaxe, division, domaine, dépassement)
//! - jetons.rs   : tokenisation paresseuse (maximal munch sur les fonctions)
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST flottant
//! - eval.rs     : Formule + evaluate (pipeline complet)
//! - serie.rs    : evaluate_series (fonctions de graphe en x)
//! - format.rs   : affichage d’un résultat

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod serie;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalc;
pub use eval::{evaluate, evaluate_detaille, Demarche, Formule};
pub use format::{format_resultat, texte_relisible};
pub use serie::{echantillons, evaluate_series};
