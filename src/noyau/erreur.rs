// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Aucune n’est fatale : tout remonte à l’appelant (l’UI affiche le message).

use thiserror::Error;

pub type ResultatCalc<T> = Result<T, ErreurCalc>;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum ErreurCalc {
    /// Caractère non reconnu ou nombre mal formé.
    #[error("erreur lexicale (position {position}) : {message}")]
    Lexicale { position: usize, message: String },

    /// Expression structurellement invalide (parenthèses, opérande, opérateur, vide...).
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("division par zéro")]
    DivisionParZero,

    /// log(x<=0), √(x<0).
    #[error("hors domaine : {0}")]
    Domaine(String),

    /// Résultat non représentable en f64.
    #[error("dépassement de capacité")]
    Depassement,

    /// `x` utilisé sans valeur liée (évaluation hors graphe).
    #[error("variable x sans valeur")]
    VariableLibre,
}

impl ErreurCalc {
    pub fn lexicale(position: usize, message: impl Into<String>) -> Self {
        Self::Lexicale {
            position,
            message: message.into(),
        }
    }

    pub fn syntaxe(message: impl Into<String>) -> Self {
        Self::Syntaxe(message.into())
    }

    pub fn domaine(message: impl Into<String>) -> Self {
        Self::Domaine(message.into())
    }

    /// Vrai pour les erreurs détectées avant l’évaluation (texte invalide).
    pub fn est_structurelle(&self) -> bool {
        matches!(self, Self::Lexicale { .. } | Self::Syntaxe(_))
    }
}
