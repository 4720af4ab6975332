//! The closed set of node and token kinds shared by the LaTeX tree and
//! the math tree. One `SyntaxKind`/[`LatexLanguage`] pair backs both
//! grammars' trees, the same way a single `SyntaxKind` backs every
//! grammar submodule in a rust-analyzer-style parser: the two grammars
//! are independent parses, but they share one tree representation.

#![allow(non_camel_case_types)]

/// Closed set of node and token kinds produced by this crate's two
/// grammars (LaTeX surface syntax, and LaTeX math mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- trivia, shared by both grammars ---
    WHITESPACE,
    /// `\r\n`-style run, in LaTeX surface syntax.
    LATEX_LINE_BREAK,
    /// `%` to end of line, excluding the terminator.
    LINE_COMMENT,

    // --- punctuation, shared by both grammars ---
    L_CURLY,
    R_CURLY,
    L_BRACKET,
    R_BRACKET,
    L_PAREN,
    R_PAREN,
    COMMA,
    PIPE,
    EQ,
    /// A control word or control symbol: `\name` or `\` followed by one
    /// non-letter character.
    COMMAND,

    // --- LaTeX-only tokens ---
    WORD,
    /// `$` or `$$`.
    DOLLAR,

    // --- math-only tokens ---
    /// The LaTeX escape `//`, not a newline.
    MATH_LINE_BREAK,
    AMPERSAND,
    PLUS,
    MINUS,
    ASTERISK,
    L_ANGLE,
    R_ANGLE,
    UNDERSCORE,
    CARET,
    /// A run of ASCII digits.
    NUMBER,
    /// A single ASCII letter, one per token.
    SYMBOL,

    // --- LaTeX node kinds (C7) ---
    ROOT,
    BEGIN,
    END,
    ENVIRONMENT,
    /// Inline math, `$ … $`.
    FORMULA,
    /// Display math, `\[ … \]`.
    EQUATION,
    CURLY_GROUP,
    BRACKET_GROUP,
    MIXED_GROUP,
    /// A generic `\name` command with its argument-like groups. Distinct
    /// from the `COMMAND` *token* kind, which is just the `\name` token
    /// itself; this is the node wrapping it plus its arguments.
    COMMAND_NODE,
    TEXT,

    // --- math node kinds (C8) ---
    /// Wraps the single top-level expression of a standalone math parse.
    /// Distinct from `ROOT`, the LaTeX grammar's document root.
    MATH_ROOT,
    BIN_OP,
    GROUPING,

    /// Reserved for `=` as a standalone relation node, distinct from the
    /// `EQ` token itself. Not produced today: §4.8 lists `Eq` as a bare
    /// token, and `=` never appears in the infix operator table, so
    /// there is no production that would build one. Kept in the closed
    /// set as a labelled extension point (see the open question on
    /// `$$` / relation handling in `DESIGN.md`) rather than invented.
    EQUAL,
    /// Reserved for a parsed `\frac{num}{den}` prefix form. Not produced
    /// today: §4.8 and §9 both flag `\frac` argument parsing as
    /// unfinished in the source spec, so `\frac` is lexed as an ordinary
    /// `Command` token and carried through the Pratt loop like any other
    /// unrecognized prefix command (see `math::grammar::expression`'s
    /// prefix dispatch). Extension point, not invented behavior.
    FRAC,
    /// Reserved for a generic math-mode command invocation with
    /// argument-like groups, mirroring `COMMAND_NODE` in the LaTeX
    /// grammar. Not produced today, for the same reason as `FRAC`: no
    /// math-mode prefix command is currently recognized as anything but
    /// a bare `Command` token.
    MATH_COMMAND,
    /// Reserved for a parenthesized-or-not generic expression wrapper.
    /// Not produced today; §4.8 names it among the node kinds C8 emits
    /// but never describes a production that builds one distinct from
    /// `Grouping`/`BinOp`/a bare token.
    EXPRESSION,

    /// An error-recovery placeholder; never produced by a successful
    /// parse (parsing aborts on the first error), kept only so node
    /// construction has somewhere to put a token that was eaten as part
    /// of error reporting before the parse aborted.
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

/// A language implementation for use with `rowan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LatexLanguage {}

impl rowan::Language for LatexLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::__LAST as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<LatexLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<LatexLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<LatexLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<LatexLanguage>;
