//! src/app/historique.rs
//!
//! Historique des calculs : suite ordonnée (expression, résultat), en ajout seulement.
//! Pas d’API de suppression ni de modification.

use std::fmt;

use crate::noyau::format_resultat;

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: f64,
}

impl fmt::Display for EntreeHistorique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, format_resultat(self.resultat))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
}

impl Historique {
    pub fn ajouter(&mut self, expression: impl Into<String>, resultat: f64) {
        let entree = EntreeHistorique {
            expression: expression.into(),
            resultat,
        };
        tracing::info!(entree = %entree, rang = self.entrees.len(), "historique");
        self.entrees.push(entree);
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn derniere(&self) -> Option<&EntreeHistorique> {
        self.entrees.last()
    }
}
