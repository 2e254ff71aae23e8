// src/noyau/format.rs
//
// Affichage d’un résultat f64 pour l’écran (résultat, historique, info mémoire).
// - entiers exacts : sans décimales (5, -12)
// - très grands / très petits : notation scientifique
// - sinon : 10 décimales max, zéros finaux retirés (sin30 -> 0.5)
//
// texte_relisible : ce qui retourne dans l’entrée (sans perte, relu par le lexer).

const SEUIL_GRAND: f64 = 1e15;
const SEUIL_PETIT: f64 = 1e-6;
const DECIMALES: usize = 10;

pub fn format_resultat(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // -0 => 0
    if v == 0.0 {
        return "0".to_string();
    }

    let a = v.abs();
    if a >= SEUIL_GRAND || a < SEUIL_PETIT {
        return format!("{v:e}");
    }

    if v.fract() == 0.0 {
        return format!("{v:.0}");
    }

    let txt = format!("{:.*}", DECIMALES, v);
    txt.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Texte d’une valeur finie que le lexer relit exactement (entrée, rappel mémoire).
///
/// Display f64 : jamais d’exposant, aller-retour exact. -0 devient 0.
pub fn texte_relisible(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    v.to_string()
}
