//! Token scanner for rule expressions.
//!
//! Tokens carry 1-based line/column positions. The scanner also enforces
//! the rule language's vocabulary: a character outside the alphabet or a
//! word no rule construct could ever use is a *lexical* error, while
//! well-formed tokens in the wrong place are left for the parser to
//! reject as syntax errors.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::months::{HebrewMonth, HijriMonth, gregorian_month_from_name};
use almanac_core::Weekday;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// An unsigned integer literal.
    Number(u32),
    /// An integer with an ordinal suffix: `1st`, `2nd`, `103rd`.
    Ordinal(u32),
    /// A word: keywords, month names, durations, zone names.
    Word(String),
    Plus,
    Minus,
    Colon,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// The token stream for one rule expression, plus the end-of-input
/// position for EOF diagnostics.
#[derive(Debug)]
pub(crate) struct TokenStream {
    pub tokens: Vec<Token>,
    pub end_line: usize,
    pub end_column: usize,
}

/// Scans a rule expression into tokens.
pub(crate) fn lex(input: &str) -> ParseResult<TokenStream> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;
    let mut column = 1;

    while let Some(&c) = chars.peek() {
        let (start_line, start_column) = (line, column);
        match c {
            '\n' => {
                chars.next();
                line += 1;
                column = 1;
            }
            c if c.is_whitespace() => {
                chars.next();
                column += 1;
            }
            '+' | '-' | ':' | ',' => {
                chars.next();
                column += 1;
                let kind = match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    ':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                };
                tokens.push(Token {
                    kind,
                    line: start_line,
                    column: start_column,
                });
            }
            c if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        chars.next();
                        column += 1;
                    } else {
                        break;
                    }
                }
                // Letters glued to digits are an ordinal suffix or junk.
                let mut suffix = String::new();
                while let Some(&a) = chars.peek() {
                    if a.is_ascii_alphabetic() {
                        suffix.push(a);
                        chars.next();
                        column += 1;
                    } else {
                        break;
                    }
                }
                let value: u32 = digits.parse().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::ValueOutOfRange,
                        start_line,
                        start_column,
                        format!("number too large: {digits}"),
                    )
                })?;
                let kind = if suffix.is_empty() {
                    TokenKind::Number(value)
                } else if is_ordinal_suffix(&suffix) {
                    TokenKind::Ordinal(value)
                } else {
                    return Err(ParseError::new(
                        ParseErrorKind::UnsupportedWord,
                        start_line,
                        start_column,
                        format!("unknown token: {digits}{suffix}"),
                    ));
                };
                tokens.push(Token {
                    kind,
                    line: start_line,
                    column: start_column,
                });
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::new();
                while let Some(&a) = chars.peek() {
                    if a.is_ascii_alphanumeric() || a == '-' || a == '/' || a == '_' {
                        word.push(a);
                        chars.next();
                        column += 1;
                    } else {
                        break;
                    }
                }
                if !is_known_word(&word) {
                    return Err(ParseError::new(
                        ParseErrorKind::UnsupportedWord,
                        start_line,
                        start_column,
                        format!("unknown word: {word}"),
                    ));
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    line: start_line,
                    column: start_column,
                });
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnsupportedCharacter,
                    start_line,
                    start_column,
                    format!("unsupported character: {other:?}"),
                ));
            }
        }
    }

    Ok(TokenStream {
        tokens,
        end_line: line,
        end_column: column,
    })
}

fn is_ordinal_suffix(suffix: &str) -> bool {
    matches!(
        suffix.to_ascii_lowercase().as_str(),
        "st" | "nd" | "rd" | "th"
    )
}

const KEYWORDS: &[&str] = &[
    "substitutes",
    "if",
    "then",
    "and",
    "next",
    "previous",
    "in",
    "on",
    "not",
    "every",
    "year",
    "years",
    "since",
    "day",
    "days",
    "before",
    "after",
    "even",
    "odd",
    "leap",
    "non-leap",
    "equinox",
    "solstice",
    "easter",
    "orthodox",
    "solarterm",
    "bengali-revised",
    "chinese",
    "korean",
    "vietnamese",
    "gmt",
    "utc",
];

/// The Hijri month-name words that are not whole month names by
/// themselves ("Rabi al-awwal" lexes as two words).
const HIJRI_NAME_PARTS: &[&str] = &["al-awwal", "al-thani", "al-qidah", "al-hijjah"];

fn is_known_word(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    KEYWORDS.contains(&lower.as_str())
        || HIJRI_NAME_PARTS.contains(&lower.as_str())
        || Weekday::from_name(word).is_some()
        || gregorian_month_from_name(word).is_some()
        || HijriMonth::from_name(word).is_some()
        || HijriMonth::is_name_prefix(word)
        || HebrewMonth::from_name(word).is_some()
        || is_duration_shaped(word)
        || word.contains('/')
}

/// ISO-8601-ish duration words: `P3D`, `PT5H`, `P1DT12H`.
fn is_duration_shaped(word: &str) -> bool {
    let mut chars = word.chars();
    if !chars.next().is_some_and(|c| c.eq_ignore_ascii_case(&'p')) {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    !rest.is_empty()
        && rest
            .iter()
            .all(|c| c.is_ascii_digit() || "dthms".contains(c.to_ascii_lowercase()))
}
