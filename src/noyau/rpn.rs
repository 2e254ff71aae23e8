// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la structure
// - Puis reconstruire Expr
//
// Règles:
// - Précédence (faible -> forte): + - < * / < moins unaire < fonction < ( ) et littéraux
// - Binaires associatifs à gauche
// - Moins unaire: '-' quand on attend une valeur => Neg (préfixe)
// - Fonction: suivie immédiatement de '(' ou d’un seul littéral (nombre ou x)
//
// NOTE:
// - Neg et fonctions sont des opérateurs préfixes: ils ne dépilent rien à l’empilement,
//   et sortent dès qu’un binaire (de précédence inférieure) arrive.

use super::erreur::{ErreurCalc, ResultatCalc};
use super::expr::Expr;
use super::jetons::{Fonction, Op, Tok};

/// Garde-fou : profondeur maximale de la pile d’opérateurs.
pub const MAX_PILE: usize = 512;

const PREC_NEG: u8 = 3;
const PREC_APPEL: u8 = 4;

/// Élément de la RPN produite par `to_rpn`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElemRpn {
    Num(f64),
    Var,
    Binaire(Op),
    Neg,
    Appel(Fonction),
}

#[derive(Clone, Copy, Debug)]
enum SurPile {
    Binaire(Op),
    Neg,
    Appel(Fonction),
    LPar,
}

impl SurPile {
    fn precedence(self) -> u8 {
        match self {
            SurPile::Binaire(op) => op.precedence(),
            SurPile::Neg => PREC_NEG,
            SurPile::Appel(_) => PREC_APPEL,
            SurPile::LPar => 0,
        }
    }

    fn en_sortie(self) -> Option<ElemRpn> {
        match self {
            SurPile::Binaire(op) => Some(ElemRpn::Binaire(op)),
            SurPile::Neg => Some(ElemRpn::Neg),
            SurPile::Appel(f) => Some(ElemRpn::Appel(f)),
            SurPile::LPar => None,
        }
    }
}

fn empiler(ops: &mut Vec<SurPile>, x: SurPile) -> ResultatCalc<()> {
    if ops.len() >= MAX_PILE {
        return Err(ErreurCalc::syntaxe("imbrication trop profonde"));
    }
    ops.push(x);
    Ok(())
}

fn operateur_manquant(tok: Tok) -> ErreurCalc {
    ErreurCalc::syntaxe(format!("opérateur manquant avant « {tok} »"))
}

fn operande_manquant(tok: Tok) -> ErreurCalc {
    ErreurCalc::syntaxe(format!("opérande manquant avant « {tok} »"))
}

fn expression_invalide() -> ErreurCalc {
    ErreurCalc::syntaxe("expression invalide")
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Num(30), Op(Plus), Num(60), RPar, Fin]
///   rpn:    [Num(30), Num(60), Binaire(Plus), Appel(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> ResultatCalc<Vec<ElemRpn>> {
    let mut out: Vec<ElemRpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<SurPile> = Vec::new();

    // vrai tant qu’un opérande (atome, '(' ou préfixe) est attendu
    let mut attend_valeur = true;
    let mut vide = true;

    let mut iter = tokens.iter().copied().peekable();

    while let Some(tok) = iter.next() {
        match tok {
            Tok::Fin => {
                if iter.next().is_some() {
                    return Err(ErreurCalc::syntaxe("jetons après la fin d’expression"));
                }
                break;
            }

            Tok::Num(_) | Tok::Var => {
                if !attend_valeur {
                    return Err(operateur_manquant(tok));
                }
                out.push(match tok {
                    Tok::Num(v) => ElemRpn::Num(v),
                    _ => ElemRpn::Var,
                });
                attend_valeur = false;
            }

            Tok::Fonction(f) => {
                if !attend_valeur {
                    return Err(operateur_manquant(tok));
                }
                // argument: groupe parenthésé ou littéral collé
                if !matches!(iter.peek(), Some(Tok::LPar | Tok::Num(_) | Tok::Var)) {
                    return Err(ErreurCalc::syntaxe(format!(
                        "fonction « {} » sans argument (attendu « ( » ou un nombre)",
                        f.nom()
                    )));
                }
                empiler(&mut ops, SurPile::Appel(f))?;
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(operateur_manquant(tok));
                }
                empiler(&mut ops, SurPile::LPar)?;
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(operande_manquant(tok));
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(SurPile::LPar) => break,
                        Some(top) => out.extend(top.en_sortie()),
                        None => {
                            return Err(ErreurCalc::syntaxe("parenthèse fermante sans ouvrante"))
                        }
                    }
                }
            }

            Tok::Op(op) => {
                if attend_valeur {
                    if op == Op::Moins {
                        empiler(&mut ops, SurPile::Neg)?;
                        vide = false;
                        continue;
                    }
                    return Err(operande_manquant(tok));
                }

                // associativité gauche: on sort tout ce qui lie au moins aussi fort
                while let Some(&top) = ops.last() {
                    if matches!(top, SurPile::LPar) || top.precedence() < op.precedence() {
                        break;
                    }
                    out.extend(top.en_sortie());
                    ops.pop();
                }

                empiler(&mut ops, SurPile::Binaire(op))?;
                attend_valeur = true;
            }
        }
        vide = false;
    }

    if attend_valeur {
        return Err(if vide {
            ErreurCalc::syntaxe("expression vide")
        } else {
            ErreurCalc::syntaxe("opérande manquant en fin d’expression")
        });
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top.en_sortie() {
            Some(e) => out.push(e),
            None => return Err(ErreurCalc::syntaxe("parenthèses non fermées")),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[ElemRpn]) -> ResultatCalc<Expr> {
    let mut st: Vec<Expr> = Vec::with_capacity(rpn.len());

    for elem in rpn.iter().copied() {
        match elem {
            ElemRpn::Num(v) => st.push(Expr::Nombre(v)),
            ElemRpn::Var => st.push(Expr::Var),

            ElemRpn::Neg => {
                let x = st.pop().ok_or_else(expression_invalide)?;
                st.push(Expr::neg(x));
            }

            ElemRpn::Appel(f) => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurCalc::syntaxe("fonction sans argument"))?;
                st.push(Expr::appel(f, x));
            }

            ElemRpn::Binaire(op) => {
                let b = st.pop().ok_or_else(expression_invalide)?;
                let a = st.pop().ok_or_else(expression_invalide)?;
                st.push(Expr::binaire(op, a, b));
            }
        }
    }

    let racine = st.pop().ok_or_else(expression_invalide)?;
    if !st.is_empty() {
        return Err(expression_invalide());
    }
    Ok(racine)
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    rpn.iter()
        .map(|e| match e {
            ElemRpn::Num(v) => v.to_string(),
            ElemRpn::Var => "x".to_string(),
            ElemRpn::Binaire(op) => op.symbole().to_string(),
            ElemRpn::Neg => "neg".to_string(),
            ElemRpn::Appel(f) => f.nom().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
