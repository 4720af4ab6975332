//! C4: the math-mode token grammar (see `spec.md` §4.4). `LineBreak` here
//! is the LaTeX escape `//`, not a newline — a literal newline in math
//! input is ordinary `Whitespace`.

use crate::error::Error;
use crate::lexer::{Cursor, Matcher, ProceduralMatch, TokenGrammar};
use crate::parser::IntoSyntaxKind;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathTokenKind {
    /// The literal two-character escape `//`.
    LineBreak,
    Whitespace,
    LeftCurly,
    RightCurly,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    Pipe,
    Ampersand,
    Eq,
    Plus,
    Minus,
    Asterisk,
    LeftAngle,
    RightAngle,
    Underscore,
    Caret,
    /// A run of ASCII digits.
    Number,
    /// A single ASCII letter; exactly one per token.
    Symbol,
    /// A control word (`\name`) or control symbol (`\` + one non-letter).
    Command,
}

impl TokenGrammar for MathTokenKind {
    const MATCHERS: &'static [Matcher<Self>] = &[
        Matcher::Pattern(line_break, MathTokenKind::LineBreak),
        Matcher::Pattern(whitespace, MathTokenKind::Whitespace),
        Matcher::Pattern(left_curly, MathTokenKind::LeftCurly),
        Matcher::Pattern(right_curly, MathTokenKind::RightCurly),
        Matcher::Pattern(left_bracket, MathTokenKind::LeftBracket),
        Matcher::Pattern(right_bracket, MathTokenKind::RightBracket),
        Matcher::Pattern(left_paren, MathTokenKind::LeftParen),
        Matcher::Pattern(right_paren, MathTokenKind::RightParen),
        Matcher::Pattern(comma, MathTokenKind::Comma),
        Matcher::Pattern(pipe, MathTokenKind::Pipe),
        Matcher::Pattern(ampersand, MathTokenKind::Ampersand),
        Matcher::Pattern(eq, MathTokenKind::Eq),
        Matcher::Pattern(plus, MathTokenKind::Plus),
        Matcher::Pattern(minus, MathTokenKind::Minus),
        Matcher::Pattern(asterisk, MathTokenKind::Asterisk),
        Matcher::Pattern(left_angle, MathTokenKind::LeftAngle),
        Matcher::Pattern(right_angle, MathTokenKind::RightAngle),
        Matcher::Pattern(underscore, MathTokenKind::Underscore),
        Matcher::Pattern(caret, MathTokenKind::Caret),
        Matcher::Pattern(number, MathTokenKind::Number),
        Matcher::Procedural(symbol),
        Matcher::Procedural(command),
    ];
}

impl IntoSyntaxKind for MathTokenKind {
    fn into_syntax(self) -> SyntaxKind {
        match self {
            MathTokenKind::LineBreak => SyntaxKind::MATH_LINE_BREAK,
            MathTokenKind::Whitespace => SyntaxKind::WHITESPACE,
            MathTokenKind::LeftCurly => SyntaxKind::L_CURLY,
            MathTokenKind::RightCurly => SyntaxKind::R_CURLY,
            MathTokenKind::LeftBracket => SyntaxKind::L_BRACKET,
            MathTokenKind::RightBracket => SyntaxKind::R_BRACKET,
            MathTokenKind::LeftParen => SyntaxKind::L_PAREN,
            MathTokenKind::RightParen => SyntaxKind::R_PAREN,
            MathTokenKind::Comma => SyntaxKind::COMMA,
            MathTokenKind::Pipe => SyntaxKind::PIPE,
            MathTokenKind::Ampersand => SyntaxKind::AMPERSAND,
            MathTokenKind::Eq => SyntaxKind::EQ,
            MathTokenKind::Plus => SyntaxKind::PLUS,
            MathTokenKind::Minus => SyntaxKind::MINUS,
            MathTokenKind::Asterisk => SyntaxKind::ASTERISK,
            MathTokenKind::LeftAngle => SyntaxKind::L_ANGLE,
            MathTokenKind::RightAngle => SyntaxKind::R_ANGLE,
            MathTokenKind::Underscore => SyntaxKind::UNDERSCORE,
            MathTokenKind::Caret => SyntaxKind::CARET,
            MathTokenKind::Number => SyntaxKind::NUMBER,
            MathTokenKind::Symbol => SyntaxKind::SYMBOL,
            MathTokenKind::Command => SyntaxKind::COMMAND,
        }
    }
}

fn line_break(s: &str) -> Option<usize> {
    s.starts_with("//").then_some(2)
}

fn whitespace(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| c.len_utf8())
        .sum();
    (len > 0).then_some(len)
}

fn left_curly(s: &str) -> Option<usize> {
    s.starts_with('{').then_some(1)
}

fn right_curly(s: &str) -> Option<usize> {
    s.starts_with('}').then_some(1)
}

fn left_bracket(s: &str) -> Option<usize> {
    s.starts_with('[').then_some(1)
}

fn right_bracket(s: &str) -> Option<usize> {
    s.starts_with(']').then_some(1)
}

fn left_paren(s: &str) -> Option<usize> {
    s.starts_with('(').then_some(1)
}

fn right_paren(s: &str) -> Option<usize> {
    s.starts_with(')').then_some(1)
}

fn comma(s: &str) -> Option<usize> {
    s.starts_with(',').then_some(1)
}

fn pipe(s: &str) -> Option<usize> {
    s.starts_with('|').then_some(1)
}

fn ampersand(s: &str) -> Option<usize> {
    s.starts_with('&').then_some(1)
}

fn eq(s: &str) -> Option<usize> {
    s.starts_with('=').then_some(1)
}

fn plus(s: &str) -> Option<usize> {
    s.starts_with('+').then_some(1)
}

fn minus(s: &str) -> Option<usize> {
    s.starts_with('-').then_some(1)
}

fn asterisk(s: &str) -> Option<usize> {
    s.starts_with('*').then_some(1)
}

fn left_angle(s: &str) -> Option<usize> {
    s.starts_with('<').then_some(1)
}

fn right_angle(s: &str) -> Option<usize> {
    s.starts_with('>').then_some(1)
}

fn underscore(s: &str) -> Option<usize> {
    s.starts_with('_').then_some(1)
}

fn caret(s: &str) -> Option<usize> {
    s.starts_with('^').then_some(1)
}

fn number(s: &str) -> Option<usize> {
    let len = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    (len > 0).then_some(len)
}

/// One ASCII letter, exactly: math symbols are single-character, unlike
/// LaTeX's `Word`, which runs to the next boundary.
fn symbol(cursor: &mut Cursor) -> Result<Option<ProceduralMatch<MathTokenKind>>, Error> {
    match cursor.first() {
        Some(c) if c.is_ascii_alphabetic() => {
            let start = cursor.pos();
            cursor.bump();
            let end = cursor.pos();
            Ok(Some(ProceduralMatch {
                kind: MathTokenKind::Symbol,
                data: Some((start, end)),
            }))
        }
        _ => Ok(None),
    }
}

/// Identical rule to the LaTeX grammar's `Command` matcher (`spec.md`
/// §4.3): control words are letter runs, control symbols are `\` plus
/// one non-letter, and a lone trailing `\` is a hard lex failure.
fn command(cursor: &mut Cursor) -> Result<Option<ProceduralMatch<MathTokenKind>>, Error> {
    if cursor.first() != Some('\\') {
        return Ok(None);
    }
    let backslash_pos = cursor.pos();
    cursor.bump();

    let next = match cursor.first() {
        None => {
            return Err(Error::lex(
                "Unexpected EOF after `\\`",
                "EOF".to_string(),
                backslash_pos,
            ));
        }
        Some(c) => c,
    };

    if !next.is_ascii_alphabetic() {
        let data_start = cursor.pos();
        cursor.bump();
        let data_end = cursor.pos();
        return Ok(Some(ProceduralMatch {
            kind: MathTokenKind::Command,
            data: Some((data_start, data_end)),
        }));
    }

    let data_start = cursor.pos();
    while matches!(cursor.first(), Some(c) if c.is_ascii_alphabetic()) {
        cursor.bump();
    }
    let data_end = cursor.pos();

    if data_start == data_end {
        return Err(Error::lex(
            "unexpected backslash",
            "\\".to_string(),
            backslash_pos,
        ));
    }

    Ok(Some(ProceduralMatch {
        kind: MathTokenKind::Command,
        data: Some((data_start, data_end)),
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn scenario_2_gamma_equals_2_plus_2() {
        use MathTokenKind::*;
        let (tokens, errors) = Lexer::<MathTokenKind>::new(r"\gamma = 2+2").tokenize();
        assert!(errors.is_empty(), "{errors:?}");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![Command, Whitespace, Eq, Whitespace, Number, Plus, Number]
        );
        assert_eq!(tokens[0].data, Some("gamma"));
        assert_eq!(tokens[4].source, "2");
        assert_eq!(tokens[6].source, "2");
    }

    #[test]
    fn single_letter_symbols_do_not_merge() {
        use MathTokenKind::*;
        let (tokens, errors) = Lexer::<MathTokenKind>::new("ab").tokenize();
        assert!(errors.is_empty());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![Symbol, Symbol]);
    }

    #[test]
    fn line_break_is_the_slash_slash_escape() {
        use MathTokenKind::*;
        let (tokens, errors) = Lexer::<MathTokenKind>::new("a // b").tokenize();
        assert!(errors.is_empty());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![Symbol, Whitespace, LineBreak, Whitespace, Symbol]);
    }
}
