// src/noyau/expr.rs
//
// AST flottant.
// - Nombre : littéral f64
// - Var    : la variable x (fonctions de graphe)
// - Neg    : moins unaire
// - Binaire / Appel : opérateur binaire, fonction unaire
//
// L’arbre appartient à la Formule qui l’a produit ; aucune mutation après le parse.

use std::fmt;

use super::jetons::{Fonction, Op};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Var,

    Neg(Box<Expr>),
    Binaire(Op, Box<Expr>, Box<Expr>),
    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn appel(f: Fonction, x: Expr) -> Expr {
        Expr::Appel(f, Box::new(x))
    }

    pub fn neg(x: Expr) -> Expr {
        Expr::Neg(Box::new(x))
    }

    /// Détecte si l’expression référence x.
    /// Itératif : pas de récursion sur des arbres profonds.
    pub fn contient_var(&self) -> bool {
        let mut pile: Vec<&Expr> = Vec::with_capacity(32);
        pile.push(self);

        while let Some(e) = pile.pop() {
            match e {
                Expr::Var => return true,
                Expr::Nombre(_) => {}
                Expr::Neg(x) | Expr::Appel(_, x) => pile.push(x),
                Expr::Binaire(_, a, b) => {
                    pile.push(a);
                    pile.push(b);
                }
            }
        }

        false
    }
}

/// Affichage entièrement parenthésé (panneau « Démarche »).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(v) => write!(f, "{v}"),
            Expr::Var => f.write_str("x"),
            Expr::Neg(x) => write!(f, "-{x}"),
            Expr::Binaire(op, a, b) => write!(f, "({a}{}{b})", op.symbole()),
            Expr::Appel(fonc, x) => write!(f, "{}({x})", fonc.nom()),
        }
    }
}
