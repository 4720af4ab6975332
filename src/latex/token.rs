//! C3: the LaTeX surface-syntax token grammar — a closed token-kind set
//! plus the ordered matcher table that recognizes it (see `spec.md`
//! §4.3).

use crate::error::Error;
use crate::lexer::{Cursor, Matcher, ProceduralMatch, TokenGrammar};
use crate::parser::IntoSyntaxKind;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatexTokenKind {
    /// A run of `\n` / `\r\n` line terminators.
    LineBreak,
    /// A run of non-newline horizontal whitespace.
    Whitespace,
    /// `%` to end of line, excluding the terminator.
    LineComment,
    LeftCurly,
    RightCurly,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    Pipe,
    Eq,
    /// Maximal run of characters excluding whitespace and LaTeX
    /// punctuation.
    Word,
    /// `$` or `$$`.
    Dollar,
    /// A control word (`\name`) or control symbol (`\` + one non-letter).
    Command,
}

impl TokenGrammar for LatexTokenKind {
    const MATCHERS: &'static [Matcher<Self>] = &[
        Matcher::Pattern(line_break, LatexTokenKind::LineBreak),
        Matcher::Pattern(whitespace, LatexTokenKind::Whitespace),
        Matcher::Pattern(line_comment, LatexTokenKind::LineComment),
        Matcher::Pattern(left_curly, LatexTokenKind::LeftCurly),
        Matcher::Pattern(right_curly, LatexTokenKind::RightCurly),
        Matcher::Pattern(left_bracket, LatexTokenKind::LeftBracket),
        Matcher::Pattern(right_bracket, LatexTokenKind::RightBracket),
        Matcher::Pattern(left_paren, LatexTokenKind::LeftParen),
        Matcher::Pattern(right_paren, LatexTokenKind::RightParen),
        Matcher::Pattern(comma, LatexTokenKind::Comma),
        Matcher::Pattern(pipe, LatexTokenKind::Pipe),
        Matcher::Pattern(eq, LatexTokenKind::Eq),
        Matcher::Pattern(word, LatexTokenKind::Word),
        Matcher::Pattern(dollar, LatexTokenKind::Dollar),
        Matcher::Procedural(command),
    ];
}

impl IntoSyntaxKind for LatexTokenKind {
    fn into_syntax(self) -> SyntaxKind {
        match self {
            LatexTokenKind::LineBreak => SyntaxKind::LATEX_LINE_BREAK,
            LatexTokenKind::Whitespace => SyntaxKind::WHITESPACE,
            LatexTokenKind::LineComment => SyntaxKind::LINE_COMMENT,
            LatexTokenKind::LeftCurly => SyntaxKind::L_CURLY,
            LatexTokenKind::RightCurly => SyntaxKind::R_CURLY,
            LatexTokenKind::LeftBracket => SyntaxKind::L_BRACKET,
            LatexTokenKind::RightBracket => SyntaxKind::R_BRACKET,
            LatexTokenKind::LeftParen => SyntaxKind::L_PAREN,
            LatexTokenKind::RightParen => SyntaxKind::R_PAREN,
            LatexTokenKind::Comma => SyntaxKind::COMMA,
            LatexTokenKind::Pipe => SyntaxKind::PIPE,
            LatexTokenKind::Eq => SyntaxKind::EQ,
            LatexTokenKind::Word => SyntaxKind::WORD,
            LatexTokenKind::Dollar => SyntaxKind::DOLLAR,
            LatexTokenKind::Command => SyntaxKind::COMMAND,
        }
    }
}

/// Punctuation excluded from `Word`: whitespace plus every LaTeX
/// delimiter/operator character that has its own token kind.
const WORD_BOUNDARY: [char; 11] = ['\\', '%', '{', '}', ',', '$', '[', ']', '(', ')', '='];

fn word(s: &str) -> Option<usize> {
    let mut len = 0;
    for c in s.chars() {
        if c.is_whitespace() || c == '|' || WORD_BOUNDARY.contains(&c) {
            break;
        }
        len += c.len_utf8();
    }
    (len > 0).then_some(len)
}

fn line_break(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut len = 0;
    loop {
        if bytes[len..].starts_with(b"\r\n") {
            len += 2;
        } else if bytes.get(len) == Some(&b'\n') {
            len += 1;
        } else {
            break;
        }
    }
    (len > 0).then_some(len)
}

fn whitespace(s: &str) -> Option<usize> {
    let len = s.bytes().take_while(|&b| b == b' ' || b == b'\t').count();
    (len > 0).then_some(len)
}

fn line_comment(s: &str) -> Option<usize> {
    if !s.starts_with('%') {
        return None;
    }
    Some(s.bytes().position(|b| b == b'\n').unwrap_or(s.len()))
}

fn dollar(s: &str) -> Option<usize> {
    if s.starts_with("$$") {
        Some(2)
    } else if s.starts_with('$') {
        Some(1)
    } else {
        None
    }
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

fn eq(s: &str) -> Option<usize> {
    s.starts_with('=').then_some(1)
}

/// The procedural `Command` matcher (see `spec.md` §4.3): distinguishes
/// control words (`\name`, letters only) from control symbols (`\` plus
/// one non-letter), and hard-fails on a lone trailing `\`.
fn command(cursor: &mut Cursor) -> Result<Option<ProceduralMatch<LatexTokenKind>>, Error> {
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
            kind: LatexTokenKind::Command,
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
        kind: LatexTokenKind::Command,
        data: Some((data_start, data_end)),
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::Lexer;

    fn kinds(source: &str) -> Vec<LatexTokenKind> {
        let (tokens, errors) = Lexer::<LatexTokenKind>::new(source).tokenize();
        assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn word_stops_at_punctuation() {
        use LatexTokenKind::*;
        assert_eq!(kinds("hello{world}"), vec![Word, LeftCurly, Word, RightCurly]);
    }

    #[test]
    fn control_word_vs_control_symbol() {
        let (tokens, errors) = Lexer::<LatexTokenKind>::new(r"\begin\,").tokenize();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].data, Some("begin"));
        assert_eq!(tokens[1].data, Some(","));
    }

    #[test]
    fn lone_backslash_is_a_lex_error() {
        let (_, errors) = Lexer::<LatexTokenKind>::new(r"\").tokenize();
        assert_eq!(errors.len(), 1);
        let message = format!("{:?}", errors[0]);
        assert!(message.contains("Unexpected EOF"), "{message}");
    }

    #[test]
    fn dollar_dollar_is_one_token() {
        use LatexTokenKind::*;
        assert_eq!(kinds("$$"), vec![Dollar]);
    }

    #[test]
    fn scenario_2_math_example_as_latex_text() {
        use LatexTokenKind::*;
        assert_eq!(
            kinds("1+1 = 2"),
            vec![Word, Whitespace, Eq, Whitespace, Word]
        );
    }
}
