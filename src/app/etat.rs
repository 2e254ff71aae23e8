//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, mémoire,
//! historique, convertisseur, graphe) et les actions des boutons, sans logique d’affichage.
//!
//! Contrats :
//! - L’évaluation passe TOUJOURS par le noyau (jamais d’évaluation générique du texte).
//! - Mémoire et historique appartiennent à cet état (pas de globale), un seul thread UI.
//! - Le nombre de points du graphe est borné (GRAPHE_POINTS_MIN..=GRAPHE_POINTS_MAX).

use crate::noyau::serie::{resumer, Point, Resume};
use crate::noyau::{
    echantillons, evaluate, evaluate_detaille, evaluate_series, format_resultat, texte_relisible,
    Demarche,
};

use super::devises::{convertir_texte, Devise};
use super::historique::Historique;
use super::memoire::Memoire;

/// Intervalle du graphe (x en degrés pour sin/cos/tan).
pub const GRAPHE_X_MIN: f64 = -10.0;
pub const GRAPHE_X_MAX: f64 = 10.0;

/// Nombre de points par défaut.
const GRAPHE_POINTS_DEFAUT: usize = 400;

/// Garde-fou : on borne le nombre de points (anti-gel).
const GRAPHE_POINTS_MAX: usize = 4000;
const GRAPHE_POINTS_MIN: usize = 2;

/// Graphe échantillonné (pas de rendu : tableau de points).
#[derive(Clone, Debug)]
pub struct Graphe {
    pub expression: String,
    pub points: Vec<Point>,
    pub resume: Resume,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // dernier résultat formaté
    pub erreur: String,   // message d’erreur (si parsing/éval échoue)
    pub info: String,     // retour des opérations mémoire

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- mémoire + historique ---
    pub memoire: Memoire,
    pub historique: Historique,

    // --- convertisseur ---
    pub montant_devise: String,
    pub devise: Devise,
    pub conversion: String,

    // --- graphe ---
    pub graphe: Option<Graphe>,
    pub points_graphe: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            info: String::new(),
            demarche: Demarche::default(),
            memoire: Memoire::default(),
            historique: Historique::default(),
            montant_devise: String::new(),
            devise: Devise::Eur,
            conversion: String::new(),
            graphe: None,
            points_graphe: GRAPHE_POINTS_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” ------------------------ */

    /// C : effacer seulement l’entrée (mémoire et historique intacts).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// Ajoute un symbole (bouton du pavé) à la fin de l’entrée.
    pub fn inserer(&mut self, s: &str) {
        self.entree.push_str(s);
        self.focus_entree = true;
    }

    /// "=" : évalue l’entrée, l’ajoute à l’historique, remplace l’entrée par le résultat.
    ///
    /// L’entrée reçoit le texte relisible (sans perte) pour enchaîner ; l’affichage
    /// arrondi ne va que dans `resultat` et l’historique.
    /// En cas d’erreur, l’entrée est CONSERVÉE (l’utilisateur corrige sa faute).
    pub fn calculer(&mut self) {
        let expression = self.entree.trim().to_string();

        match evaluate_detaille(&expression) {
            Ok((v, demarche)) => {
                self.historique.ajouter(expression, v);
                self.entree = texte_relisible(v);
                self.set_resultat(format_resultat(v), demarche);
            }
            Err(e) => {
                tracing::warn!(%expression, erreur = %e, "évaluation refusée");
                self.set_erreur(e.to_string());
            }
        }
    }

    /// M+
    pub fn memoire_plus(&mut self) {
        if let Some(v) = self.valeur_entree_memoire() {
            match self.memoire.ajouter(v) {
                Ok(m) => {
                    self.entree.clear();
                    self.set_info(format!("Ajouté à la mémoire : {}", format_resultat(m)));
                }
                Err(e) => self.set_erreur(format!("mémoire inchangée ({e})")),
            }
        }
    }

    /// M-
    pub fn memoire_moins(&mut self) {
        if let Some(v) = self.valeur_entree_memoire() {
            match self.memoire.soustraire(v) {
                Ok(m) => {
                    self.entree.clear();
                    self.set_info(format!("Soustrait de la mémoire : {}", format_resultat(m)));
                }
                Err(e) => self.set_erreur(format!("mémoire inchangée ({e})")),
            }
        }
    }

    /// MR : remplace l’entrée par la mémoire (la mémoire ne change pas).
    pub fn memoire_rappel(&mut self) {
        self.entree = texte_relisible(self.memoire.rappeler());
        self.focus_entree = true;
    }

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire.effacer();
        self.set_info("Mémoire effacée");
    }

    /// L’entrée doit s’évaluer en nombre (ex: "12", "2+3") pour M+ / M-.
    fn valeur_entree_memoire(&mut self) -> Option<f64> {
        match evaluate(self.entree.trim()) {
            Ok(v) => Some(v),
            Err(e) => {
                self.set_erreur(format!("entrée invalide pour la mémoire ({e})"));
                None
            }
        }
    }

    /// Convertit `montant_devise` (USD) vers `devise`.
    pub fn convertir_devise(&mut self) {
        match convertir_texte(&self.montant_devise, self.devise.code()) {
            Ok(c) => {
                self.erreur.clear();
                self.conversion = c.to_string();
            }
            Err(e) => {
                self.conversion.clear();
                self.set_erreur(e.to_string());
            }
        }
    }

    /// Échantillonne l’entrée comme fonction de x sur [GRAPHE_X_MIN, GRAPHE_X_MAX].
    pub fn tracer(&mut self) {
        let expression = self.entree.trim().to_string();
        let xs = echantillons(GRAPHE_X_MIN, GRAPHE_X_MAX, self.points_graphe);
        let points = evaluate_series(&expression, &xs);

        // texte invalide : la même erreur sur chaque point, on l’affiche une fois
        if let Some((_, Err(e))) = points.first() {
            if e.est_structurelle() {
                self.graphe = None;
                self.set_erreur(e.to_string());
                return;
            }
        }

        let resume = resumer(&points);
        tracing::info!(
            %expression,
            valides = resume.valides,
            echecs = resume.echecs,
            "graphe échantillonné"
        );

        self.erreur.clear();
        self.graphe = Some(Graphe {
            expression,
            points,
            resume,
        });
        self.focus_entree = true;
    }

    /// Garde-fou : limite le nombre de points (évite abus / gel).
    pub fn set_points_graphe(&mut self, n: usize) {
        self.points_graphe = n.clamp(GRAPHE_POINTS_MIN, GRAPHE_POINTS_MAX);
    }

    /* ------------------------ Utilitaires ------------------------ */

    /// Placer une erreur. On conserve le dernier résultat affiché.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.info.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    fn set_info(&mut self, msg: impl Into<String>) {
        self.erreur.clear();
        self.info = msg.into();
        self.focus_entree = true;
    }

    fn set_resultat(&mut self, resultat: String, demarche: Demarche) {
        self.erreur.clear();
        self.info.clear();
        self.resultat = resultat;
        self.demarche = demarche;
        self.focus_entree = true;
    }
}
