//! src/app/devises.rs
//!
//! Convertisseur de devises à taux STATIQUES (base USD).
//! Aucun accès réseau : les taux sont des constantes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::noyau::format_resultat;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum ErreurDevise {
    #[error("devise inconnue : {0}")]
    Inconnue(String),

    #[error("montant invalide : {0}")]
    MontantInvalide(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Devise {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
    Aud,
    Cad,
    Chf,
    Cny,
    Mxn,
}

impl Devise {
    pub const TOUTES: [Devise; 10] = [
        Devise::Usd,
        Devise::Eur,
        Devise::Gbp,
        Devise::Jpy,
        Devise::Inr,
        Devise::Aud,
        Devise::Cad,
        Devise::Chf,
        Devise::Cny,
        Devise::Mxn,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Devise::Usd => "USD",
            Devise::Eur => "EUR",
            Devise::Gbp => "GBP",
            Devise::Jpy => "JPY",
            Devise::Inr => "INR",
            Devise::Aud => "AUD",
            Devise::Cad => "CAD",
            Devise::Chf => "CHF",
            Devise::Cny => "CNY",
            Devise::Mxn => "MXN",
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Devise::Usd => "United States Dollar",
            Devise::Eur => "Euro",
            Devise::Gbp => "British Pound",
            Devise::Jpy => "Japanese Yen",
            Devise::Inr => "Indian Rupee",
            Devise::Aud => "Australian Dollar",
            Devise::Cad => "Canadian Dollar",
            Devise::Chf => "Swiss Franc",
            Devise::Cny => "Chinese Yuan",
            Devise::Mxn => "Mexican Peso",
        }
    }

    /// Unités de cette devise pour 1 USD.
    pub fn taux(self) -> f64 {
        match self {
            Devise::Usd => 1.0,
            Devise::Eur => 0.85,
            Devise::Gbp => 0.75,
            Devise::Jpy => 110.0,
            Devise::Inr => 74.0,
            Devise::Aud => 1.3,
            Devise::Cad => 1.25,
            Devise::Chf => 0.9,
            Devise::Cny => 6.5,
            Devise::Mxn => 20.0,
        }
    }
}

impl FromStr for Devise {
    type Err = ErreurDevise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Devise::TOUTES
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ErreurDevise::Inconnue(code.to_string()))
    }
}

/// Résultat d’une conversion depuis l’USD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conversion {
    pub montant_usd: f64,
    pub vers: Devise,
    pub converti: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} USD = {:.2} {}",
            format_resultat(self.montant_usd),
            self.converti,
            self.vers.code()
        )
    }
}

pub fn convertir(montant_usd: f64, vers: Devise) -> Conversion {
    Conversion {
        montant_usd,
        vers,
        converti: montant_usd * vers.taux(),
    }
}

/// Conversion depuis la saisie brute (montant + code devise).
pub fn convertir_texte(montant: &str, code: &str) -> Result<Conversion, ErreurDevise> {
    let m = montant.trim();
    let v: f64 = m
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ErreurDevise::MontantInvalide(m.to_string()))?;
    let vers = code.parse::<Devise>()?;
    Ok(convertir(v, vers))
}
