//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs d’évaluation attendues (division par zéro, domaine, dépassement)
//! - invariant clé : une expression générée bien formée ne donne jamais d’erreur structurelle

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, tokenize};
use super::{evaluate, evaluate_series};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalc) -> bool {
    // Liste blanche : erreurs normales sur une expression bien formée.
    matches!(
        e,
        ErreurCalc::DivisionParZero | ErreurCalc::Domaine(_) | ErreurCalc::Depassement
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (utile pour tester les divisions et log)
    let entier = rng.pick(8) * if rng.coin() { 1 } else { 45 };
    if rng.coin() {
        format!("{entier}.{}", rng.pick(100))
    } else {
        format!("{entier}")
    }
}

fn gen_fonction(rng: &mut Rng) -> &'static str {
    match rng.pick(7) {
        0 => "sin",
        1 => "cos",
        2 => "tan",
        3 => "log",
        4 => "exp",
        5 => "√",
        _ => "sqrt",
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(9) {
        0 => gen_nombre(rng),
        1 => format!(
            "({}+{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        2 => format!(
            "({} - {})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        3 => format!(
            "{}*{}",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        4 => format!(
            "({}/{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        5 => format!("-{}", gen_expr(rng, depth - 1)),
        // fonction collée à un nombre (forme "sin90")
        6 => format!("{}{}", gen_fonction(rng), gen_nombre(rng)),
        _ => format!("{}({})", gen_fonction(rng), gen_expr(rng, depth - 1)),
    }
}

fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '1', '2', '.', '+', '-', '*', '/', '(', ')', ' ', 's', 'i', 'n', 'x', 'q', '√', '#', 'é',
    ];
    let n = rng.pick(24) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_erreurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);
        let premier = evaluate(&expr);

        // Même texte => même sortie (pas d’état caché)
        assert_eq!(premier, evaluate(&expr), "expr={expr:?}");

        match premier {
            Ok(v) => {
                assert!(v.is_finite(), "expr={expr:?} v={v}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_aller_retour_jetons() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let jetons = tokenize(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        let texte = format_tokens(&jetons);

        let relus = tokenize(&texte).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        assert_eq!(jetons, relus, "expr={expr:?} texte={texte:?}");

        // texte reconstruit => même valeur
        assert_eq!(evaluate(&expr), evaluate(&texte), "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..400 {
        budget(t0, max);

        let bruit = gen_bruit(&mut rng);
        // on veut seulement : pas de panique, une erreur typée ou une valeur finie
        match evaluate(&bruit) {
            Ok(v) => assert!(v.is_finite(), "bruit={bruit:?}"),
            Err(e) => assert!(!e.to_string().is_empty()),
        }

        let pts = evaluate_series(&bruit, &[-1.0, 0.0, 1.0]);
        assert_eq!(pts.len(), 3);
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_somme_plate_refusee_proprement() {
    // 10 000 termes : au-delà de la borne de jetons => erreur, pas de débordement de pile
    let expr = vec!["1"; 10_000].join("+");
    assert!(matches!(evaluate(&expr), Err(ErreurCalc::Syntaxe(_))));

    // 1000 termes : accepté
    let expr = vec!["1"; 1000].join("+");
    assert_eq!(evaluate(&expr), Ok(1000.0));
}
