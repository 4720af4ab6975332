//! LaTeX surface syntax: the C3 token grammar and the C7 structural
//! parser built on top of it.

mod grammar;
mod token;

pub use token::LatexTokenKind as TokenKind;

use crate::builder::SyntaxTree;
use crate::error::Error;
use crate::lexer::{Lexer, Token};
use crate::parser::Parser;

/// Tokenize `source` under the LaTeX surface-syntax grammar (C3). Always
/// returns every token lexed before a fault; `errors` is non-empty only
/// if lexing hit a lone trailing `\` or leftover unrecognized input.
pub fn lex(source: &str) -> (Vec<Token<'_, TokenKind>>, Vec<Error>) {
    Lexer::<TokenKind>::new(source).tokenize()
}

/// Parse `source` as a LaTeX document (C7), producing a lossless
/// [`SyntaxTree`]. Aborts at the first lexical or syntactic fault — see
/// `spec.md` §7.
pub fn parse(source: &str) -> Result<SyntaxTree, Error> {
    let (tokens, mut lex_errors) = lex(source);
    if let Some(err) = lex_errors.drain(..).next() {
        return Err(err);
    }
    let mut parser = Parser::new(source, tokens);
    grammar::root(&mut parser)?;
    parser.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_input_yields_empty_token_sequence() {
        let (tokens, errors) = lex("");
        assert!(tokens.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn scenario_6_lone_backslash_is_a_lex_error() {
        let err = parse("\\").expect_err("a lone backslash must fail to lex");
        assert_eq!(err.kind(), crate::error::ErrorKind::LexError);
    }
}
