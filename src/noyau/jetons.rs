// src/noyau/jetons.rs

use super::erreurs::LexError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,

    // Fonctions + variable (tout ce qui n’est pas pi / opérateur / nombre)
    // NOTE: l'analyseur décidera si c’est une fonction (sin/cos/...), la variable x, ou une erreur.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

/// Jeton + position (octet) dans la chaîne source, pour les messages d'erreur.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .25, 1e-3, 2.5E+4)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π ou pi
/// - identifiants [a-zA-Z]+ (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut i: usize = 0;

    let pos_de = |k: usize| chars.get(k).map(|(p, _)| *p).unwrap_or(s.len());

    while i < chars.len() {
        let (pos, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs + parenthèses
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Pi),
            // Racine carrée unicode : √  => ident("sqrt")
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton { tok, pos });
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z]+
        // (pas de chiffres dans les noms : "x2" se lit x·2)
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].1.is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().map(|(_, ch)| ch).collect();
            let w = word.to_lowercase();

            // Normalisation : "pi" devient Tok::Pi
            let tok = if w == "pi" { Tok::Pi } else { Tok::Ident(w) };
            out.push(Jeton { tok, pos });
            continue;
        }

        // Nombre : chiffres [. chiffres] [e [+-] chiffres]
        let point_decimal = c == '.' && chars.get(i + 1).is_some_and(|(_, d)| d.is_ascii_digit());
        if c.is_ascii_digit() || point_decimal {
            while i < chars.len() && chars[i].1.is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i].1 == '.' {
                i += 1;
                while i < chars.len() && chars[i].1.is_ascii_digit() {
                    i += 1;
                }
            }

            // suffixe exposant seulement si des chiffres suivent (sinon "2e" = 2 puis ident "e")
            if i < chars.len() && (chars[i].1 == 'e' || chars[i].1 == 'E') {
                let mut k = i + 1;
                if k < chars.len() && (chars[k].1 == '+' || chars[k].1 == '-') {
                    k += 1;
                }
                if k < chars.len() && chars[k].1.is_ascii_digit() {
                    i = k;
                    while i < chars.len() && chars[i].1.is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let texte = &s[pos..pos_de(i)];
            let v: f64 = texte.parse().map_err(|_| LexError::NombreInvalide {
                texte: texte.to_string(),
                pos,
            })?;
            if !v.is_finite() {
                return Err(LexError::NombreInvalide {
                    texte: texte.to_string(),
                    pos,
                });
            }

            out.push(Jeton {
                tok: Tok::Num(v),
                pos,
            });
            continue;
        }

        return Err(LexError::CaractereInattendu { c, pos });
    }

    Ok(out)
}

/// Texte d'un jeton (messages d'erreur + démarche).
pub fn format_tok(t: &Tok) -> String {
    match t {
        Tok::Num(v) => format!("{v}"),
        Tok::Pi => "π".to_string(),
        Tok::Ident(name) => name.clone(),

        Tok::Plus => "+".to_string(),
        Tok::Minus => "-".to_string(),
        Tok::Star => "*".to_string(),
        Tok::Slash => "/".to_string(),
        Tok::Caret => "^".to_string(),

        Tok::LPar => "(".to_string(),
        Tok::RPar => ")".to_string(),
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Jeton]) -> String {
    tokens
        .iter()
        .map(|j| format_tok(&j.tok))
        .collect::<Vec<_>>()
        .join(" ")
}
