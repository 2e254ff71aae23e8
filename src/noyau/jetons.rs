// src/noyau/jetons.rs
//
// Tokenisation paresseuse.
// - Lexer : itérateur de Result<Tok>, clonable (donc redémarrable)
// - tokenize : collecte complète (termine toujours par Tok::Fin)
// - format_tokens : texte des jetons (démarche + aller-retour)

use std::fmt;

use super::erreur::{ErreurCalc, ResultatCalc};

/// Au-delà, l’expression est refusée (borne la profondeur de l’arbre et le temps d’évaluation).
pub const MAX_JETONS: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Div,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Div => '/',
        }
    }

    /// Précédence binaire (toutes associatives à gauche).
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Moins => 1,
            Op::Fois | Op::Div => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Exp,
    Racine,
}

impl Fonction {
    /// Ordre de reconnaissance : plus long nom d’abord (maximal munch).
    pub const TOUTES: [Fonction; 6] = [
        Fonction::Racine,
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Log,
        Fonction::Exp,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Exp => "exp",
            Fonction::Racine => "sqrt",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Op),
    LPar,
    RPar,
    Fonction(Fonction),

    // variable libre des fonctions de graphe
    Var,

    Fin,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Op(op) => write!(f, "{}", op.symbole()),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Fonction(fonc) => f.write_str(fonc.nom()),
            Tok::Var => f.write_str("x"),
            Tok::Fin => Ok(()),
        }
    }
}

/// Lexer paresseux sur une chaîne.
///
/// Émet `Tok::Fin` une seule fois en fin d’entrée, puis s’arrête.
/// S’arrête aussi après la première erreur.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize, // octets
    fini: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            fini: false,
        }
    }

    /// Repart du début de la même chaîne.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.fini = false;
    }

    /// Colonne courante en caractères (pour les messages d’erreur).
    fn colonne(&self) -> usize {
        self.src[..self.pos].chars().count()
    }

    fn reste(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn erreur(&mut self, message: String) -> ErreurCalc {
        self.fini = true;
        ErreurCalc::lexicale(self.colonne(), message)
    }

    fn fonction_en_tete(&self) -> Option<Fonction> {
        let reste = self.reste();
        Fonction::TOUTES.into_iter().find(|f| {
            let nom = f.nom();
            reste
                .get(..nom.len())
                .is_some_and(|tete| tete.eq_ignore_ascii_case(nom))
        })
    }

    fn lire_nombre(&mut self) -> ResultatCalc<Tok> {
        let debut = self.pos;
        let mut points = 0usize;

        while let Some(c) = self.reste().chars().next() {
            if c == '.' {
                points += 1;
                if points > 1 {
                    return Err(self.erreur("deux points décimaux dans un nombre".into()));
                }
            } else if !c.is_ascii_digit() {
                break;
            }
            self.pos += c.len_utf8();
        }

        let texte = &self.src[debut..self.pos];
        if !texte.bytes().any(|b| b.is_ascii_digit()) {
            self.pos = debut;
            return Err(self.erreur(format!("nombre invalide: '{texte}'")));
        }

        match texte.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Tok::Num(v)),
            // littéral hors f64 : "inf" ne se relirait pas
            Ok(_) => {
                self.pos = debut;
                Err(self.erreur("nombre trop grand".into()))
            }
            Err(_) => {
                self.pos = debut;
                Err(self.erreur(format!("nombre invalide: '{texte}'")))
            }
        }
    }

    fn suivant(&mut self) -> ResultatCalc<Tok> {
        // Espaces
        let reste = self.reste();
        let saut = reste.len() - reste.trim_start().len();
        self.pos += saut;

        let Some(c) = self.reste().chars().next() else {
            self.fini = true;
            return Ok(Tok::Fin);
        };

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Op(Op::Plus)),
            '-' => Some(Tok::Op(Op::Moins)),
            '*' => Some(Tok::Op(Op::Fois)),
            '/' => Some(Tok::Op(Op::Div)),
            // Racine carrée unicode (bouton √)
            '√' => Some(Tok::Fonction(Fonction::Racine)),
            _ => None,
        };
        if let Some(t) = simple {
            self.pos += c.len_utf8();
            return Ok(t);
        }

        if c.is_ascii_digit() || c == '.' {
            return self.lire_nombre();
        }

        if let Some(f) = self.fonction_en_tete() {
            self.pos += f.nom().len();
            return Ok(Tok::Fonction(f));
        }

        if c == 'x' || c == 'X' {
            self.pos += 1;
            return Ok(Tok::Var);
        }

        Err(self.erreur(format!("caractère inattendu: '{c}'")))
    }
}

impl Iterator for Lexer<'_> {
    type Item = ResultatCalc<Tok>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fini {
            return None;
        }
        Some(self.suivant())
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenize une chaîne complète. Le dernier jeton est toujours `Tok::Fin`.
pub fn tokenize(s: &str) -> ResultatCalc<Vec<Tok>> {
    let mut out = Vec::new();
    for jeton in Lexer::new(s) {
        out.push(jeton?);
        if out.len() > MAX_JETONS {
            return Err(ErreurCalc::syntaxe("expression trop longue"));
        }
    }
    Ok(out)
}

/// Texte des jetons séparés par des espaces (Fin omis).
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .filter(|t| !matches!(t, Tok::Fin))
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
