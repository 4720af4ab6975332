//! LaTeX math mode: the C4 token grammar and the C8 Pratt parser built
//! on top of it.

mod grammar;
mod token;

pub use grammar::InfixOp;
pub(crate) use grammar::infix_op;
pub use token::MathTokenKind as TokenKind;

use crate::builder::SyntaxTree;
use crate::error::Error;
use crate::lexer::{Lexer, Token};
use crate::parser::Parser;

/// Tokenize `source` under the math-mode grammar (C4).
pub fn lex(source: &str) -> (Vec<Token<'_, TokenKind>>, Vec<Error>) {
    Lexer::<TokenKind>::new(source).tokenize()
}

/// Parse `source` as a standalone math expression (C8), producing a
/// [`SyntaxTree`] rooted at a `MATH_ROOT` node.
///
/// Per `spec.md` §4.8, `Whitespace` and the `//` `LineBreak` escape are
/// filtered out of the token buffer before the Pratt loop runs — math
/// mode is whitespace-insensitive at this level, and unlike the LaTeX
/// grammar (C7), the resulting tree is **not** required to be lossless:
/// filtered trivia bytes are not reachable from any node. See
/// `DESIGN.md`'s resolution of the open question this spells out.
pub fn parse(source: &str) -> Result<SyntaxTree, Error> {
    let (tokens, mut lex_errors) = lex(source);
    if let Some(err) = lex_errors.drain(..).next() {
        return Err(err);
    }
    let tokens: Vec<_> = tokens
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::LineBreak))
        .collect();
    let mut parser = Parser::new(source, tokens);
    grammar::parse_root(&mut parser)?;
    parser.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scenario_2_gamma_equals_2_plus_2() {
        use TokenKind::*;
        let (tokens, errors) = lex(r"\gamma = 2+2");
        assert!(errors.is_empty());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![Command, Whitespace, Eq, Whitespace, Number, Plus, Number]);
    }
}
