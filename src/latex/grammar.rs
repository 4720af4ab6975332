//! C7: the LaTeX structural parser — recursive descent over the tokens
//! produced by [`super::token::LatexTokenKind`] (C3), emitted through the
//! generic parser engine (C6) and tree builder (C5). See `spec.md` §4.7
//! for the grammar this mirrors line for line.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::token::LatexTokenKind as K;

type LatexParser<'input> = Parser<'input, K>;

/// `Root ← Content*`.
pub(crate) fn root(p: &mut LatexParser) -> Result<(), crate::Error> {
    let node = p.start_node(SyntaxKind::ROOT);
    while !p.at_end() {
        content(p)?;
    }
    node.finish()
}

/// Dispatches on the current token's kind (`spec.md` §4.7's `Content`
/// production). Whitespace, line breaks and comments are trivia and are
/// consumed as direct children wherever they occur, never wrapped.
fn content(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let Some(kind) = p.peek() else {
        return Ok(());
    };
    match kind {
        K::LineBreak | K::Whitespace | K::LineComment => p.consume(),
        K::RightCurly | K::RightParen | K::RightBracket => {
            Err(p.err_at_current("Unmatched punctuation"))
        }
        K::LeftCurly => curly_group(p),
        K::LeftParen | K::LeftBracket => mixed_group(p),
        K::Dollar => formula(p),
        K::Word => text(p),
        K::Eq | K::Pipe | K::Comma => p.consume(),
        K::Command => match p.peek_data() {
            Some("begin") => environment(p),
            Some("[") => equation(p),
            _ => generic_command(p),
        },
    }
}

/// Consumes a maximal run of trivia tokens (whitespace, line breaks,
/// comments) as-is, per the grammar's "Trivia" production.
fn consume_trivia(p: &mut LatexParser) -> Result<(), crate::Error> {
    while matches!(p.peek(), Some(K::LineBreak | K::Whitespace | K::LineComment)) {
        p.consume()?;
    }
    Ok(())
}

fn at_end_command(p: &LatexParser) -> bool {
    p.at(K::Command) && p.peek_data() == Some("end")
}

fn at_close_bracket_command(p: &LatexParser) -> bool {
    p.at(K::Command) && p.peek_data() == Some("]")
}

/// `CurlyGroup ← { Content* }`; delimiters are included as children.
fn curly_group(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::CURLY_GROUP);
    p.expect(K::LeftCurly)?;
    while !p.at_end() && !p.at(K::RightCurly) {
        content(p)?;
    }
    p.expect(K::RightCurly)?;
    node.finish()
}

/// `BracketGroup ← [ Content* ]`; the content loop stops on `}`, `]`, or
/// `\end`.
fn bracket_group(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::BRACKET_GROUP);
    p.expect(K::LeftBracket)?;
    while !p.at_end() && !p.at(K::RightCurly) && !p.at(K::RightBracket) && !at_end_command(p) {
        content(p)?;
    }
    p.expect(K::RightBracket)?;
    node.finish()
}

/// `MixedGroup ← ( | [ ) Content* ( ) | ] )`; delimiters may be
/// mismatched. The content loop stops on `}`, `)`, `]`, or `\end`.
fn mixed_group(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::MIXED_GROUP);
    p.expect2(K::LeftParen, K::LeftBracket)?;
    while !p.at_end()
        && !p.at(K::RightCurly)
        && !p.at(K::RightParen)
        && !p.at(K::RightBracket)
        && !at_end_command(p)
    {
        content(p)?;
    }
    p.expect2(K::RightParen, K::RightBracket)?;
    node.finish()
}

/// `Formula ← $ Content* $`; the inner loop also stops on `}` or `\end`.
fn formula(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::FORMULA);
    p.expect(K::Dollar)?;
    while !p.at_end() && !p.at(K::Dollar) && !p.at(K::RightCurly) && !at_end_command(p) {
        content(p)?;
    }
    p.expect(K::Dollar)?;
    node.finish()
}

/// `Equation ← \[ Content* \]`; the inner loop stops on `}`, `\end`, or
/// `\]`. `\[` and `\]` are `Command` tokens whose `data` is `"["`/`"]"`
/// respectively (see `spec.md` §4.3's control-symbol rule).
fn equation(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::EQUATION);
    p.expect(K::Command)?; // `\[`
    while !p.at_end() && !p.at(K::RightCurly) && !at_end_command(p) && !at_close_bracket_command(p)
    {
        content(p)?;
    }
    if at_close_bracket_command(p) {
        p.consume()?;
    } else {
        return Err(p.err_at_current("Expected \\]"));
    }
    node.finish()
}

/// `Begin ← \begin Trivia CurlyGroup? BracketGroup?`.
fn begin(p: &mut LatexParser) -> Result<(), crate::Error> {
    let node = p.start_node(SyntaxKind::BEGIN);
    p.expect(K::Command)?; // `\begin`
    consume_trivia(p)?;
    if p.at(K::LeftCurly) {
        curly_group(p)?;
    }
    if p.at(K::LeftBracket) {
        bracket_group(p)?;
    }
    node.finish()
}

/// `End ← \end Trivia CurlyGroup?`.
fn end(p: &mut LatexParser) -> Result<(), crate::Error> {
    let node = p.start_node(SyntaxKind::END);
    p.expect(K::Command)?; // `\end`
    consume_trivia(p)?;
    if p.at(K::LeftCurly) {
        curly_group(p)?;
    }
    node.finish()
}

/// `Environment ← Begin Content* End`. Begin/end names are not required
/// to match; that check is deferred to a higher layer (`spec.md` §9's
/// open question, resolved conservatively — see `DESIGN.md`).
fn environment(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::ENVIRONMENT);
    begin(p)?;
    while !p.at_end() && !p.at(K::RightCurly) && !at_end_command(p) {
        content(p)?;
    }
    if at_end_command(p) {
        end(p)?;
    } else {
        return Err(p.err_at_current("Expected \\end"));
    }
    node.finish()
}

/// Generic `Command ← \name (CurlyGroup | MixedGroup)*`: any command
/// that isn't `\begin` or `\[`. Trivia right after the command name is
/// consumed once, then the parser looks for argument-like groups until
/// none follow.
fn generic_command(p: &mut LatexParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::COMMAND_NODE);
    p.consume()?; // `\name`
    consume_trivia(p)?;
    loop {
        match p.peek() {
            Some(K::LeftCurly) => curly_group(p)?,
            Some(K::LeftBracket) | Some(K::LeftParen) => mixed_group(p)?,
            _ => break,
        }
    }
    node.finish()
}

/// `Text ← Word (Word | LineBreak | LineComment | Whitespace | Comma |
/// Pipe)*`.
fn text(p: &mut LatexParser) -> Result<(), crate::Error> {
    let node = p.start_node(SyntaxKind::TEXT);
    p.expect(K::Word)?;
    loop {
        match p.peek() {
            Some(K::Word | K::LineBreak | K::LineComment | K::Whitespace | K::Comma | K::Pipe) => {
                p.consume()?;
            }
            _ => break,
        }
    }
    node.finish()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    fn check_ast(input: &str, expected: &str) {
        let tree = crate::latex::parse(input).expect("expected a successful parse");
        let actual = format!("{tree:?}");
        assert_eq!(actual.trim(), expected.trim());
    }

    #[test]
    fn scenario_1_environment_with_display_math() {
        let input = "\\begin{document}\nHello, world!\n\\[1+1 = 2\\]\n\\end{document}";
        let tree = crate::latex::parse(input).expect("expected a successful parse");
        assert_eq!(tree.source_string(), input);
    }

    #[test]
    fn scenario_5_unmatched_right_curly() {
        let err = crate::latex::parse("}").expect_err("stray `}` must fail to parse");
        assert_eq!(err.kind(), crate::error::ErrorKind::ParseError);
        assert_eq!(format!("{:?}", err.row_col("}")), "(1, 1)");
    }

    #[test]
    fn environment_begin_end_names_need_not_match() {
        let tree = crate::latex::parse("\\begin{foo}\\end{bar}")
            .expect("mismatched begin/end names are accepted by the structural parser");
        assert_eq!(tree.source_string(), "\\begin{foo}\\end{bar}");
    }

    #[test]
    fn generic_command_with_two_groups() {
        check_ast(
            "\\foo[bar]{baz}",
            r#"
ROOT@0..14
  COMMAND_NODE@0..14
    COMMAND@0..4 "\foo"
    MIXED_GROUP@4..9
      L_BRACKET@4..5 "["
      WORD@5..8 "bar"
      R_BRACKET@8..9 "]"
    CURLY_GROUP@9..14
      L_CURLY@9..10 "{"
      WORD@10..13 "baz"
      R_CURLY@13..14 "}"
            "#,
        );
    }

    #[test]
    fn mixed_group_allows_mismatched_delimiters() {
        check_ast(
            "(a, b]",
            r#"
ROOT@0..6
  MIXED_GROUP@0..6
    L_PAREN@0..1 "("
    WORD@1..2 "a"
    COMMA@2..3 ","
    WHITESPACE@3..4 " "
    WORD@4..5 "b"
    R_BRACKET@5..6 "]"
            "#,
        );
    }
}
