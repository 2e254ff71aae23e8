//! src/app/memoire.rs
//!
//! Registre mémoire (M+, M-, MR, MC).
//!
//! Contrats :
//! - persiste entre les calculs jusqu’à un effacement explicite (MC)
//! - le rappel (MR) ne modifie jamais la valeur
//! - la valeur reste finie : un cumul qui déborde est refusé, la mémoire ne change pas

use crate::noyau::erreur::{ErreurCalc, ResultatCalc};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: f64,
}

impl Memoire {
    /// M+ : retourne la nouvelle valeur.
    pub fn ajouter(&mut self, v: f64) -> ResultatCalc<f64> {
        self.cumuler(self.valeur + v, "M+")
    }

    /// M- : retourne la nouvelle valeur.
    pub fn soustraire(&mut self, v: f64) -> ResultatCalc<f64> {
        self.cumuler(self.valeur - v, "M-")
    }

    fn cumuler(&mut self, nouvelle: f64, op: &'static str) -> ResultatCalc<f64> {
        if !nouvelle.is_finite() {
            tracing::warn!(memoire = self.valeur, op, "dépassement, mémoire inchangée");
            return Err(ErreurCalc::Depassement);
        }
        self.valeur = nouvelle;
        tracing::info!(memoire = self.valeur, op);
        Ok(self.valeur)
    }

    /// MR
    pub fn rappeler(&self) -> f64 {
        self.valeur
    }

    /// MC
    pub fn effacer(&mut self) {
        self.valeur = 0.0;
        tracing::info!("MC");
    }
}
