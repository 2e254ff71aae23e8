//! Tests de propriétés (campagne) : sémantique infixe + erreurs + idempotence + concurrence.
//!
//! Notes :
//! - Les valeurs trig passent par une conversion degrés -> radians :
//!   on compare avec une tolérance, jamais à l’égalité stricte.
//! - Les cas tabulés utilisent rstest (une ligne = un cas).

use std::time::{Duration, Instant};

use rstest::rstest;

use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, tokenize};
use super::{evaluate, evaluate_series};

fn assert_proche(expr: &str, attendu: f64) {
    let v = evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Sémantique infixe ------------------------ */

#[rstest]
#[case("2+3*4", 14.0)]
#[case("(2+3)*4", 20.0)]
#[case("2*3+4", 10.0)]
#[case("100/10/5", 2.0)]
#[case("10-5-2", 3.0)]
#[case("10-(5-2)", 7.0)]
#[case("1+2-3+4", 4.0)]
#[case("2*3/4", 1.5)]
#[case("-3+5", 2.0)]
#[case("-(3+5)*2", -16.0)]
#[case("((((7))))", 7.0)]
#[case("1.5*4", 6.0)]
fn sci_arithmetique_infixe(#[case] expr: &str, #[case] attendu: f64) {
    assert_eq!(evaluate(expr), Ok(attendu), "expr={expr:?}");
}

/* ------------------------ Fonctions (degrés, base 10) ------------------------ */

#[rstest]
#[case("sin90", 1.0)]
#[case("sin 90", 1.0)]
#[case("sin(90)", 1.0)]
#[case("SIN(45+45)", 1.0)]
#[case("cos180", -1.0)]
#[case("tan(45)", 1.0)]
#[case("log10", 1.0)]
#[case("log(0.01)", -2.0)]
#[case("exp(0)", 1.0)]
#[case("sqrt(2)*sqrt(2)", 2.0)]
#[case("√16+sin90", 5.0)]
#[case("2*sin30+1", 2.0)]
fn sci_fonctions(#[case] expr: &str, #[case] attendu: f64) {
    assert_proche(expr, attendu);
}

/* ------------------------ Erreurs typées ------------------------ */

#[test]
fn sci_division_par_zero() {
    assert_eq!(evaluate("1/0"), Err(ErreurCalc::DivisionParZero));
}

#[test]
fn sci_domaines() {
    assert!(matches!(evaluate("sqrt(-1)"), Err(ErreurCalc::Domaine(_))));
    assert!(matches!(evaluate("log(0)"), Err(ErreurCalc::Domaine(_))));
}

#[rstest]
#[case("")]
#[case("(2+3")]
#[case("2+3)")]
#[case("2+")]
#[case("2 3")]
#[case("sin")]
#[case("()")]
fn sci_erreurs_syntaxe(#[case] expr: &str) {
    assert!(
        matches!(evaluate(expr), Err(ErreurCalc::Syntaxe(_))),
        "expr={expr:?} -> {:?}",
        evaluate(expr)
    );
}

#[rstest]
#[case("2 & 3")]
#[case("1..2")]
#[case("print(1)")]
#[case("2**3")]
fn sci_erreurs_non_syntaxe_ou_lexicales(#[case] expr: &str) {
    // "2**3" est lexicalement valide mais structurellement faux
    let e = evaluate(expr).expect_err(expr);
    assert!(e.est_structurelle(), "expr={expr:?} err={e:?}");
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn sci_idempotence() {
    for expr in ["2+3*4", "sin(30)", "1/0", "log(0)", "(2+3", "exp800", "x"] {
        let premier = evaluate(expr);
        for _ in 0..5 {
            assert_eq!(premier, evaluate(expr), "expr={expr:?}");
        }
    }
}

/* ------------------------ Séries ------------------------ */

#[test]
fn sci_serie_carre() {
    let pts = evaluate_series("x*x", &[-2.0, -1.0, 0.0, 1.0, 2.0]);
    let ys: Vec<_> = pts.iter().map(|(x, y)| (*x, y.clone())).collect();
    assert_eq!(
        ys,
        vec![
            (-2.0, Ok(4.0)),
            (-1.0, Ok(1.0)),
            (0.0, Ok(0.0)),
            (1.0, Ok(1.0)),
            (2.0, Ok(4.0)),
        ]
    );
}

#[test]
fn sci_serie_trig_en_x() {
    let pts = evaluate_series("sin(x)", &[0.0, 90.0, 270.0]);
    let ys: Vec<f64> = pts
        .into_iter()
        .map(|(_, y)| y.unwrap_or_else(|e| panic!("err={e}")))
        .collect();
    assert!(ys[0].abs() < 1e-12);
    assert!((ys[1] - 1.0).abs() < 1e-12);
    assert!((ys[2] + 1.0).abs() < 1e-12);
}

/* ------------------------ Aller-retour jetons ------------------------ */

#[rstest]
#[case("2 + 3")]
#[case("sin90*-x")]
#[case("  sqrt ( 2.500 ) / log100 ")]
#[case("√(x)-.5")]
#[case("COS(0)")]
fn sci_aller_retour_jetons(#[case] expr: &str) {
    let t = tokenize(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    let texte = format_tokens(&t);
    assert_eq!(tokenize(&texte), Ok(t), "expr={expr:?} texte={texte:?}");

    // équivalence: même valeur pour chaque x
    let xs = [0.5, 4.0];
    assert_eq!(evaluate_series(expr, &xs), evaluate_series(&texte, &xs));
}

#[test]
fn sci_aller_retour_grands_litteraux() {
    // fini : relu à l’identique (Display f64 sans exposant)
    let grand = format!("{}+1", "9".repeat(300));
    let t = tokenize(&grand).unwrap_or_else(|e| panic!("err={e}"));
    assert_eq!(tokenize(&format_tokens(&t)), Ok(t));

    // hors f64 : refusé à la lecture, jamais de jeton "inf"
    let enorme = "9".repeat(400);
    assert!(matches!(
        tokenize(&enorme),
        Err(ErreurCalc::Lexicale { position: 0, .. })
    ));
}

/* ------------------------ Concurrence ------------------------ */

#[test]
fn sci_appels_concurrents() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    std::thread::scope(|s| {
        let poignees: Vec<_> = (0..4)
            .map(|i| {
                s.spawn(move || {
                    let mut total = 0.0;
                    for k in 0..200 {
                        let expr = format!("({i}+{k})*2 - sin90");
                        total += evaluate(&expr).unwrap_or_else(|e| panic!("{expr}: {e}"));
                    }
                    total
                })
            })
            .collect();

        for (i, p) in poignees.into_iter().enumerate() {
            let total = p.join().unwrap_or_else(|_| panic!("thread {i} a paniqué"));
            // somme_k ((i+k)*2 - 1) = 400*i + 2*19900 - 200
            let attendu = 400.0 * i as f64 + 39_800.0 - 200.0;
            assert!((total - attendu).abs() < 1e-6, "thread {i}: {total}");
        }
    });

    budget(t0, max);
}
