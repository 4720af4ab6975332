//! C8: the math-mode Pratt (precedence-climbing) parser, over the
//! tokens produced by [`super::token::MathTokenKind`] (C4). See
//! `spec.md` §4.8 for the operator table this implements verbatim.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::token::MathTokenKind as K;

type MathParser<'input> = Parser<'input, K>;

/// The ten infix operators this grammar recognizes, in the order
/// `spec.md` §4.8 lists them. Kept separate from [`SyntaxKind`] because
/// several operators (`\cup`, `\cap`, `\in`) share the single `COMMAND`
/// token kind and are only distinguished by their payload text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Union,
    Intersection,
    In,
    Le,
    Ge,
    Plus,
    Minus,
    Times,
    Superscript,
    Subscript,
}

/// The single source of truth for the token/command-name → operator
/// mapping, shared by the parser (which drives it off a [`MathTokenKind`]
/// + optional command name) and the typed AST layer (C9, which only has
/// a [`SyntaxKind`] + token text to go on). Isolating this table here,
/// rather than duplicating it, is the design note in `spec.md` §9:
/// "isolate the token→op mapping in one function."
///
/// `command_name` is consulted only when `kind` is `SyntaxKind::COMMAND`
/// and should be the command's name *without* the leading backslash
/// (e.g. `"cup"`, not `"\cup"`).
pub(crate) fn infix_op(kind: SyntaxKind, command_name: Option<&str>) -> Option<(InfixOp, (u8, u8))> {
    match kind {
        SyntaxKind::COMMAND => match command_name? {
            "cup" => Some((InfixOp::Union, (78, 79))),
            "cap" => Some((InfixOp::Intersection, (80, 81))),
            "in" => Some((InfixOp::In, (90, 91))),
            _ => None,
        },
        SyntaxKind::L_ANGLE => Some((InfixOp::Le, (90, 91))),
        SyntaxKind::R_ANGLE => Some((InfixOp::Ge, (90, 91))),
        SyntaxKind::PLUS => Some((InfixOp::Plus, (100, 101))),
        SyntaxKind::MINUS => Some((InfixOp::Minus, (100, 101))),
        SyntaxKind::ASTERISK => Some((InfixOp::Times, (102, 103))),
        SyntaxKind::CARET => Some((InfixOp::Superscript, (104, 105))),
        SyntaxKind::UNDERSCORE => Some((InfixOp::Subscript, (104, 105))),
        _ => None,
    }
}

/// `parse() wraps a single top-level expression(0) as the sole child of
/// a Root node` (`spec.md` §4.8) — `MATH_ROOT` here, to keep it distinct
/// from the LaTeX grammar's document `ROOT` in the shared `SyntaxKind`.
pub(crate) fn parse_root(p: &mut MathParser) -> Result<(), crate::Error> {
    let node = p.start_node(SyntaxKind::MATH_ROOT);
    expression(p, 0)?;
    node.finish()
}

/// Precedence-climbing entry point. `min_prec` is the minimum left
/// binding power an infix operator needs to be folded into the
/// expression currently being built; left-associativity falls out of
/// the `loop`, right-associativity would come from recursing at the
/// same (rather than incremented) power.
fn expression(p: &mut MathParser, min_prec: u8) -> Result<(), crate::Error> {
    p.limit_err()?;
    let checkpoint = p.checkpoint();
    prefix(p)?;

    loop {
        let Some(kind) = p.peek() else { break };
        let command_name = p.peek_data();
        let Some((_op, (left_prec, right_prec))) =
            infix_op(crate::parser::IntoSyntaxKind::into_syntax(kind), command_name)
        else {
            break;
        };
        if left_prec < min_prec {
            break;
        }
        p.consume()?; // the operator token
        expression(p, right_prec)?;
        checkpoint.clone().wrap_node(SyntaxKind::BIN_OP).finish()?;
    }

    Ok(())
}

/// Prefix dispatch on the current token (`spec.md` §4.8).
fn prefix(p: &mut MathParser) -> Result<(), crate::Error> {
    p.limit_err()?;
    match p.peek() {
        Some(K::LeftCurly) => grouping(p, K::LeftCurly, K::RightCurly),
        Some(K::LeftParen) => grouping(p, K::LeftParen, K::RightParen),
        Some(K::LeftBracket) => grouping(p, K::LeftBracket, K::RightBracket),
        Some(K::Number) | Some(K::Symbol) => p.consume(),
        // Generic commands are carried through as bare tokens. A
        // recognized prefix form (e.g. `\frac{num}{den}`) would be
        // parsed here instead, but `spec.md` §4.8/§9 both flag `\frac`
        // argument parsing as unfinished in the source; this is that
        // labelled extension point, left unimplemented rather than
        // guessed at (see `DESIGN.md`).
        Some(K::Command) => p.consume(),
        Some(_) => Err(p.err_at_current("Unexpected punctuation")),
        None => Err(p.err_at_current("Unexpected end of input")),
    }
}

/// `Grouping`: opens on `{`/`(`/`[`, recurses at `min_prec = 0`, then
/// requires the matching closer. Per `spec.md` §4.8 the closing
/// delimiter is "consumed without being appended to the tree" — the
/// `Grouping` node conveys the bracket kind structurally, so the tree
/// doesn't also need the closing token as a child. (The opening
/// delimiter is not called out the same way, so it is pushed as an
/// ordinary child; see `DESIGN.md`'s open-question resolution.)
fn grouping(p: &mut MathParser, open: K, close: K) -> Result<(), crate::Error> {
    p.limit_err()?;
    let node = p.start_node(SyntaxKind::GROUPING);
    p.expect(open)?;
    expression(p, 0)?;
    p.expect_ignore(close)?;
    node.finish()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    fn check_ast(input: &str, expected: &str) {
        let tree = crate::math::parse(input).expect("expected a successful parse");
        let actual = format!("{tree:?}");
        assert_eq!(actual.trim(), expected.trim());
    }

    /// `\cap` has the higher binding power in the table above (80/81
    /// vs. `\cup`'s 78/79), so precedence-climbing folds `b \cap c`
    /// into the right-hand recursive call made while still parsing
    /// `\cup`'s right side, giving `BinOp(a, \cup, BinOp(b, \cap, c))`:
    /// Union at the root, Intersection nested as its rhs. See
    /// `DESIGN.md`'s open-question resolution for why this differs
    /// from the worked tree shape in `spec.md` §8 scenario 3.
    #[test]
    fn scenario_3_cap_binds_tighter_than_cup() {
        use crate::cst::CstNode;

        let tree = crate::math::parse(r"a \cup b \cap c").expect("expected a successful parse");
        let root = crate::cst::MathRoot::cast(tree.syntax().clone()).unwrap();
        let top = root.expression().expect("top-level BinOp");
        let top = match top {
            crate::cst::MathExpr::BinOp(b) => b,
            other => panic!("expected a top-level BinOp, got {other:?}"),
        };
        assert_eq!(top.op(), Some(super::InfixOp::Union));
        let rhs = top.rhs().expect("rhs");
        let rhs = match rhs {
            crate::cst::MathExpr::BinOp(b) => b,
            other => panic!("expected rhs to be a BinOp, got {other:?}"),
        };
        assert_eq!(rhs.op(), Some(super::InfixOp::Intersection));
    }

    /// Whitespace is filtered out of the token buffer before the Pratt
    /// loop ever sees it (`spec.md` §4.8), so it never becomes a tree
    /// child and the computed ranges below are contiguous over the
    /// *non-whitespace* tokens only — not over the original source
    /// positions. See `DESIGN.md`'s open-question resolution.
    #[test]
    fn scenario_4_grouping_and_precedence() {
        check_ast(
            "2 + (2^e * 4)",
            r#"
MATH_ROOT@0..8
  BIN_OP@0..8
    NUMBER@0..1 "2"
    PLUS@1..2 "+"
    GROUPING@2..8
      L_PAREN@2..3 "("
      BIN_OP@3..8
        BIN_OP@3..6
          NUMBER@3..4 "2"
          CARET@4..5 "^"
          SYMBOL@5..6 "e"
        ASTERISK@6..7 "*"
        NUMBER@7..8 "4"
            "#,
        );
    }

    #[test]
    fn left_associative_addition() {
        check_ast(
            "1+2+3",
            r#"
MATH_ROOT@0..5
  BIN_OP@0..5
    BIN_OP@0..3
      NUMBER@0..1 "1"
      PLUS@1..2 "+"
      NUMBER@2..3 "2"
    PLUS@3..4 "+"
    NUMBER@4..5 "3"
            "#,
        );
    }

    #[test]
    fn unmatched_grouping_is_a_parse_error() {
        let err = crate::math::parse("(a").expect_err("unterminated group must fail");
        assert_eq!(err.kind(), crate::error::ErrorKind::ParseError);
    }

    #[test]
    fn leading_infix_token_is_unexpected_punctuation() {
        let err = crate::math::parse("+a").expect_err("a leading `+` has no prefix form");
        let message = format!("{err:?}");
        assert!(message.contains("Unexpected punctuation"), "{message}");
    }
}
