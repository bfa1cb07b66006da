//! Tokenizer.
//!
//! Accepts decimal numbers (`12`, `0.5`, `.5`), operators `+ - * / ^`,
//! parentheses, `π`/`√`, and identifiers `[a-zA-Z_][a-zA-Z0-9_]*`
//! (case-sensitive). Whether an identifier is a function, a constant, or a
//! variable is decided by the parser.

use super::parse::ParseError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Tok {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LPar,
    RPar,
}

pub(crate) fn tokenize(s: &str) -> Result<Vec<Tok>, ParseError> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        let single = match c {
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            'π' => Some(Tok::Ident("pi".into())),
            '√' => Some(Tok::Ident("sqrt".into())),
            _ => None,
        };
        if let Some(t) = single {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let begin = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let lit: String = chars[begin..i].iter().collect();
            let v = lit
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(lit.clone()))?;
            out.push(Tok::Num(v));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let begin = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[begin..i].iter().collect();
            out.push(Tok::Ident(name));
            continue;
        }

        return Err(ParseError::UnexpectedChar { ch: c, at: i });
    }

    if out.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(out)
}
