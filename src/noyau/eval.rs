//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> évaluation f64
//!
//! Contrats :
//! - fonction pure : aucun état global, même texte => même résultat (ou même erreur)
//! - sin/cos/tan : argument en degrés
//! - log : base 10 ; √ et log vérifient leur domaine
//! - tout résultat non fini => Depassement (jamais d’infini silencieux)

use super::erreur::{ErreurCalc, ResultatCalc};
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize, Fonction, Op};
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Trace textuelle d’une évaluation (panneau « Démarche »).
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Expression analysée une fois, évaluable autant de fois que voulu.
#[derive(Clone, Debug, PartialEq)]
pub struct Formule {
    expr: Expr,
}

impl Formule {
    pub fn parse(texte: &str) -> ResultatCalc<Formule> {
        let jetons = tokenize(texte)?;
        let expr = from_rpn(&to_rpn(&jetons)?)?;
        Ok(Formule { expr })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn contient_var(&self) -> bool {
        self.expr.contient_var()
    }

    /// Évalue avec `x` lié (ou non).
    pub fn evaluer(&self, x: Option<f64>) -> ResultatCalc<f64> {
        evaluer_expr(&self.expr, x)
    }
}

fn fini(v: f64) -> ResultatCalc<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurCalc::Depassement)
    }
}

fn appliquer(f: Fonction, v: f64) -> ResultatCalc<f64> {
    let r = match f {
        Fonction::Sin => v.to_radians().sin(),
        Fonction::Cos => v.to_radians().cos(),
        Fonction::Tan => v.to_radians().tan(),
        Fonction::Log => {
            if v <= 0.0 {
                return Err(ErreurCalc::domaine(format!(
                    "log d’un argument non positif ({v})"
                )));
            }
            v.log10()
        }
        Fonction::Exp => v.exp(),
        Fonction::Racine => {
            if v < 0.0 {
                return Err(ErreurCalc::domaine(format!(
                    "racine carrée d’un argument négatif ({v})"
                )));
            }
            v.sqrt()
        }
    };
    fini(r)
}

/// Évaluation récursive d’un arbre.
/// La profondeur est bornée en amont (MAX_JETONS, MAX_PILE).
pub fn evaluer_expr(expr: &Expr, x: Option<f64>) -> ResultatCalc<f64> {
    match expr {
        // le lexer refuse déjà les littéraux non finis ; un arbre construit à la main non
        Expr::Nombre(v) => fini(*v),

        Expr::Var => x.ok_or(ErreurCalc::VariableLibre).and_then(fini),

        Expr::Neg(a) => Ok(-evaluer_expr(a, x)?),

        Expr::Appel(f, a) => appliquer(*f, evaluer_expr(a, x)?),

        Expr::Binaire(op, a, b) => {
            let va = evaluer_expr(a, x)?;
            let vb = evaluer_expr(b, x)?;
            let r = match op {
                Op::Plus => va + vb,
                Op::Moins => va - vb,
                Op::Fois => va * vb,
                Op::Div => {
                    if vb == 0.0 {
                        return Err(ErreurCalc::DivisionParZero);
                    }
                    va / vb
                }
            };
            fini(r)
        }
    }
}

/// API publique : évalue une expression sans variable.
#[tracing::instrument(level = "debug")]
pub fn evaluate(expression: &str) -> ResultatCalc<f64> {
    let v = Formule::parse(expression)?.evaluer(None)?;
    tracing::debug!(valeur = v, "évaluation réussie");
    Ok(v)
}

/// Comme `evaluate`, avec la démarche (jetons, RPN, arbre).
#[tracing::instrument(level = "debug")]
pub fn evaluate_detaille(expression: &str) -> ResultatCalc<(f64, Demarche)> {
    let jetons = tokenize(expression)?;
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;

    let v = evaluer_expr(&expr, None)?;
    tracing::debug!(valeur = v, "évaluation réussie");

    let demarche = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_rpn(&rpn),
        arbre: expr.to_string(),
    };
    Ok((v, demarche))
}
