// src/noyau/serie.rs
//
// Fonctions de graphe : une Formule en x évaluée sur une suite d’échantillons.
// Un échantillon en échec n’interrompt pas la série : chaque point garde son Result.

use super::erreur::ResultatCalc;
use super::eval::Formule;

pub type Point = (f64, ResultatCalc<f64>);

/// API publique : y = f(x) pour chaque x, dans l’ordre.
///
/// Le texte est analysé une seule fois. S’il est invalide, chaque échantillon
/// porte la même erreur.
#[tracing::instrument(level = "debug", skip(xs), fields(n = xs.len()))]
pub fn evaluate_series(expression: &str, xs: &[f64]) -> Vec<Point> {
    match Formule::parse(expression) {
        Ok(f) => xs.iter().map(|&x| (x, f.evaluer(Some(x)))).collect(),
        Err(e) => {
            tracing::debug!(erreur = %e, "formule invalide");
            xs.iter().map(|&x| (x, Err(e.clone()))).collect()
        }
    }
}

/// `n` échantillons régulièrement espacés, bornes incluses (comme linspace).
pub fn echantillons(debut: f64, fin: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![debut],
        _ => {
            let pas = (fin - debut) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { fin } else { debut + pas * i as f64 })
                .collect()
        }
    }
}

/// Résumé d’une série (affichage du graphe en tableau).
#[derive(Clone, Debug, PartialEq)]
pub struct Resume {
    pub valides: usize,
    pub echecs: usize,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

pub fn resumer(points: &[Point]) -> Resume {
    let mut r = Resume {
        valides: 0,
        echecs: 0,
        y_min: None,
        y_max: None,
    };

    for (_, y) in points {
        match y {
            Ok(v) => {
                r.valides += 1;
                r.y_min = Some(r.y_min.map_or(*v, |m| m.min(*v)));
                r.y_max = Some(r.y_max.map_or(*v, |m| m.max(*v)));
            }
            Err(_) => r.echecs += 1,
        }
    }

    r
}
