//! C9: typed, kind-gated views over the green tree produced by C5/C7/C8.
//!
//! Every wrapper here is a thin, non-owning handle onto a [`SyntaxNode`]
//! or [`SyntaxToken`]: construction ([`CstNode::cast`] /
//! [`CstToken::cast`]) checks the underlying element's kind against the
//! wrapper's declared kind (I3) and fails rather than coercing a
//! mismatched node, mirroring the teacher crate's `cst::CstNode` (see
//! `cst/mod.rs` in the teacher, though ours is hand-written rather than
//! generated from an ungrammar file — there are nine node kinds here,
//! not the teacher's full GraphQL grammar).

use rowan::NodeOrToken;

use crate::math::InfixOp;
use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed view over a green *node*.
pub trait CstNode: Sized {
    /// The single [`SyntaxKind`] this wrapper accepts.
    const KIND: SyntaxKind;

    /// Construct `Self` from `syntax`, failing (I3) unless
    /// `syntax.kind() == Self::KIND`.
    fn cast(syntax: SyntaxNode) -> Option<Self>;

    /// The underlying green node this wrapper views.
    fn syntax(&self) -> &SyntaxNode;
}

/// A typed view over a green *token*. `Literal` and `Symbol` (§4.9) wrap
/// tokens directly rather than nodes, so they need a separate trait from
/// [`CstNode`].
pub trait CstToken: Sized {
    const KIND: SyntaxKind;

    fn cast(syntax: SyntaxToken) -> Option<Self>;

    fn syntax(&self) -> &SyntaxToken;

    fn text(&self) -> &str {
        self.syntax().text()
    }
}

fn child_node<N: CstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find(|n| n.kind() == N::KIND).and_then(N::cast)
}

/// First `WORD` token reachable anywhere under `node` — used by
/// `Begin::name`/`End::name`, which look "among the direct children
/// (including inside the curly group child)" (§4.9).
fn first_word(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens().find_map(|element| match element {
        NodeOrToken::Token(t) if t.kind() == SyntaxKind::WORD => Some(t),
        _ => None,
    })
}

/// `concat(node) = source`: the lossless reconstruction of any subtree
/// (§4.9's concatenation helper).
pub fn concat(node: &SyntaxNode) -> String {
    node.text().to_string()
}

macro_rules! cst_node {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl CstNode for $name {
            const KIND: SyntaxKind = $kind;

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                (syntax.kind() == Self::KIND).then(|| Self(syntax))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// --- LaTeX wrappers (C7) ---

cst_node!(
    /// `\begin` plus its optional curly/bracket argument groups.
    Begin,
    SyntaxKind::BEGIN
);

cst_node!(
    /// `\end` plus its optional curly-group argument.
    End,
    SyntaxKind::END
);

cst_node!(
    /// A `\begin{name}…\end{name}` block. Begin/end names are not
    /// required to match (§4.7's deferred-validation design; see
    /// `DESIGN.md`).
    Environment,
    SyntaxKind::ENVIRONMENT
);

cst_node!(
    /// A generic `{ … }` group.
    CurlyGroup,
    SyntaxKind::CURLY_GROUP
);

cst_node!(
    /// A `[ … ]` group that stops its content loop on `}`/`]`/`\end`.
    BracketGroup,
    SyntaxKind::BRACKET_GROUP
);

cst_node!(
    /// A `(`/`[`-opened group whose delimiters may be mismatched.
    MixedGroup,
    SyntaxKind::MIXED_GROUP
);

cst_node!(
    /// Inline math, `$ … $`.
    Formula,
    SyntaxKind::FORMULA
);

cst_node!(
    /// Display math, `\[ … \]`.
    Equation,
    SyntaxKind::EQUATION
);

cst_node!(
    /// A generic `\name` command with its argument-like groups.
    Command,
    SyntaxKind::COMMAND_NODE
);

cst_node!(
    /// A run of text-like tokens: `Word`, trivia, `Comma`, `Pipe`.
    Text,
    SyntaxKind::TEXT
);

impl Begin {
    /// First `Word` token anywhere among the direct children (including
    /// inside the curly-group child), or `None`.
    pub fn name(&self) -> Option<SyntaxToken> {
        first_word(self.syntax())
    }
}

impl End {
    /// Symmetric to [`Begin::name`].
    pub fn name(&self) -> Option<SyntaxToken> {
        first_word(self.syntax())
    }
}

impl Environment {
    /// The first direct `Begin` child, if any.
    pub fn begin(&self) -> Option<Begin> {
        child_node(self.syntax())
    }

    /// The first direct `End` child, if any.
    pub fn end(&self) -> Option<End> {
        child_node(self.syntax())
    }

    /// The concatenation of every token's source reachable, in order,
    /// from the children strictly between `Begin` and `End`. `None` if
    /// either is missing.
    pub fn body_text(&self) -> Option<String> {
        self.begin()?;
        self.end()?;

        let mut text = String::new();
        let mut inside = false;
        for element in self.syntax().children_with_tokens() {
            let is_begin = matches!(&element, NodeOrToken::Node(n) if n.kind() == SyntaxKind::BEGIN);
            let is_end = matches!(&element, NodeOrToken::Node(n) if n.kind() == SyntaxKind::END);

            if is_end {
                break;
            }
            if inside {
                match &element {
                    NodeOrToken::Node(n) => text.push_str(&n.text().to_string()),
                    NodeOrToken::Token(t) => text.push_str(t.text()),
                }
            }
            if is_begin {
                inside = true;
            }
        }
        Some(text)
    }
}

// --- Math wrappers (C9, §4.9) ---

/// Wraps a `Number` token; `value()` parses its source as a decimal
/// integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(SyntaxToken);

impl CstToken for Literal {
    const KIND: SyntaxKind = SyntaxKind::NUMBER;

    fn cast(syntax: SyntaxToken) -> Option<Self> {
        (syntax.kind() == Self::KIND).then(|| Self(syntax))
    }

    fn syntax(&self) -> &SyntaxToken {
        &self.0
    }
}

impl Literal {
    pub fn value(&self) -> Option<u64> {
        self.text().parse().ok()
    }
}

/// Wraps a `Symbol` token; `name()` returns its single-character
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(SyntaxToken);

impl CstToken for Symbol {
    const KIND: SyntaxKind = SyntaxKind::SYMBOL;

    fn cast(syntax: SyntaxToken) -> Option<Self> {
        (syntax.kind() == Self::KIND).then(|| Self(syntax))
    }

    fn syntax(&self) -> &SyntaxToken {
        &self.0
    }
}

impl Symbol {
    pub fn name(&self) -> char {
        self.text().chars().next().expect("Symbol token is always one ASCII letter")
    }
}

/// A parenthesized/braced/bracketed subexpression. The delimiter kind
/// isn't retained as a typed field — per §4.8 the `Grouping` node
/// structurally conveys it (a closing delimiter is dropped entirely
/// rather than pushed, so only the opening one distinguishes `(`/`[`/`{`
/// in the tree; see `DESIGN.md`).
cst_node!(Grouping, SyntaxKind::GROUPING);

/// A binary operation. Per §4.9, a `BinOp` only casts successfully when
/// its children are exactly `[lhs, op_token, rhs]` and `op_token` maps
/// to a known [`InfixOp`] (not just any node of kind `BIN_OP`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinOp(SyntaxNode);

impl CstNode for BinOp {
    const KIND: SyntaxKind = SyntaxKind::BIN_OP;

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        if syntax.kind() != Self::KIND {
            return None;
        }
        let children: Vec<_> = syntax.children_with_tokens().collect();
        let [_lhs, op, _rhs] = <[_; 3]>::try_from(children).ok()?;
        let op = op.into_token()?;
        crate::math::infix_op(op.kind(), Some(op.text().trim_start_matches('\\')))?;
        Some(Self(syntax))
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl BinOp {
    fn parts(&self) -> (SyntaxElement, SyntaxToken, SyntaxElement) {
        let mut children = self.0.children_with_tokens();
        let lhs = children.next().expect("BinOp::cast guarantees exactly 3 children");
        let op = children
            .next()
            .and_then(|e| e.into_token())
            .expect("BinOp::cast guarantees the middle child is a token");
        let rhs = children.next().expect("BinOp::cast guarantees exactly 3 children");
        (lhs, op, rhs)
    }

    /// The operator this node was built from, per the table in §4.8.
    pub fn op(&self) -> Option<InfixOp> {
        let (_, op, _) = self.parts();
        crate::math::infix_op(op.kind(), Some(op.text().trim_start_matches('\\')))
            .map(|(op, _precedence)| op)
    }

    /// The left-hand side, coerced (in order) into `Literal`, `Symbol`,
    /// or `BinOp`; `None` if none applies.
    pub fn lhs(&self) -> Option<MathExpr> {
        let (lhs, _, _) = self.parts();
        MathExpr::coerce(lhs)
    }

    /// The right-hand side; see [`BinOp::lhs`].
    pub fn rhs(&self) -> Option<MathExpr> {
        let (_, _, rhs) = self.parts();
        MathExpr::coerce(rhs)
    }
}

/// One of the three kinds `BinOp::lhs`/`BinOp::rhs` know how to coerce a
/// child into.
#[derive(Debug, Clone)]
pub enum MathExpr {
    Literal(Literal),
    Symbol(Symbol),
    BinOp(BinOp),
}

impl MathExpr {
    fn coerce(element: SyntaxElement) -> Option<Self> {
        match element {
            NodeOrToken::Token(t) => Literal::cast(t.clone())
                .map(MathExpr::Literal)
                .or_else(|| Symbol::cast(t).map(MathExpr::Symbol)),
            NodeOrToken::Node(n) => BinOp::cast(n).map(MathExpr::BinOp),
        }
    }
}

/// The root of a standalone math parse (C8). Not named in §4.9 (which
/// only specifies per-node accessors), but a natural entry point for
/// walking the tree it returns — mirrors the teacher's `cst::Document`
/// acting as the typed handle onto a parsed root.
cst_node!(MathRoot, SyntaxKind::MATH_ROOT);

impl MathRoot {
    /// The sole top-level expression, coerced like `BinOp::lhs`/`rhs`.
    pub fn expression(&self) -> Option<MathExpr> {
        self.syntax().children_with_tokens().next().and_then(MathExpr::coerce)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scenario_1_environment_body_text() {
        let input = "\\begin{document}\nHello, world!\n\\[1+1 = 2\\]\n\\end{document}";
        let tree = crate::latex::parse(input).unwrap();
        let root = tree.syntax();
        let environment = root
            .children()
            .find_map(Environment::cast)
            .expect("expected an Environment node");
        assert_eq!(
            environment.body_text().as_deref(),
            Some("\nHello, world!\n\\[1+1 = 2\\]\n")
        );
        assert_eq!(concat(root), input);
    }

    #[test]
    fn environment_begin_end_names() {
        let tree = crate::latex::parse("\\begin{document}\\end{document}").unwrap();
        let environment = tree
            .syntax()
            .children()
            .find_map(Environment::cast)
            .unwrap();
        let begin_name = environment.begin().unwrap().name().unwrap();
        let end_name = environment.end().unwrap().name().unwrap();
        assert_eq!(begin_name.text(), "document");
        assert_eq!(end_name.text(), "document");
    }

    #[test]
    fn p6_typed_kind_gating() {
        let tree = crate::latex::parse("hello").unwrap();
        let root = tree.syntax().clone();
        assert!(Environment::cast(root.clone()).is_none());

        let text_node = root.first_child().expect("a Text node");
        assert_eq!(text_node.kind(), SyntaxKind::TEXT);
        let text = Text::cast(text_node.clone()).expect("Text::cast must accept a TEXT node");
        assert_eq!(text.syntax(), &text_node);
    }

    #[test]
    fn literal_and_symbol_wrap_tokens_not_nodes() {
        let tree = crate::math::parse("7").unwrap();
        let root = MathRoot::cast(tree.syntax().clone()).unwrap();
        match root.expression() {
            Some(MathExpr::Literal(lit)) => assert_eq!(lit.value(), Some(7)),
            other => panic!("expected a Literal, got {other:?}"),
        }
    }
}
