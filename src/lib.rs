#![doc = include_str!("../README.md")]

mod builder;
mod cst;
mod error;
mod latex;
mod lexer;
mod limit;
mod location;
mod math;
mod parser;
mod syntax_kind;

pub use crate::builder::SyntaxTree;
pub use crate::cst::{
    BinOp, Begin, BracketGroup, Command, CstNode, CstToken, CurlyGroup, End, Environment,
    Equation, Formula, Grouping, Literal, MathExpr, MathRoot, MixedGroup, Symbol, Text, concat,
};
pub use crate::error::{Error, ErrorKind};
pub use crate::math::InfixOp;
pub use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

pub use crate::latex::{lex as lex_latex, parse as parse_latex, TokenKind as LatexTokenKind};
pub use crate::math::{lex as lex_math, parse as parse_math, TokenKind as MathTokenKind};
