//! A stack-based parse-tree builder — a zipper over a partially
//! constructed node. `rowan::GreenNodeBuilder` already maintains the
//! parent-stack/pending-children pair this needs, so this module is a
//! thin, invariant-checked wrapper around it rather than a hand-rolled
//! stack.

use std::fmt;

use rowan::GreenNodeBuilder;

use crate::error::Error;
use crate::syntax_kind::{SyntaxElement, SyntaxKind};

#[derive(Debug)]
pub(crate) struct SyntaxTreeBuilder {
    builder: GreenNodeBuilder<'static>,
    /// Number of `start_node` calls not yet matched by `finish_node`.
    /// Used only to detect an unbalanced build and turn it into an
    /// `AssertionError` instead of a rowan panic.
    depth: usize,
}

impl SyntaxTreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            depth: 0,
        }
    }

    /// `start_node(kind)`: push a frame with a fresh open node of `kind`.
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
        self.depth += 1;
    }

    /// `end_node()`: pop the top frame. Fails with an assertion if the
    /// stack is empty.
    pub(crate) fn finish_node(&mut self) -> Result<(), Error> {
        if self.depth == 0 {
            return Err(Error::assertion("end_node called with an empty builder stack"));
        }
        self.builder.finish_node();
        self.depth -= 1;
        Ok(())
    }

    /// `push(item)`: append a token to `pending_children`.
    pub(crate) fn token(&mut self, kind: SyntaxKind, text: &str) {
        self.builder.token(kind.into(), text);
    }

    /// A checkpoint into the current `pending_children` buffer, to later
    /// retroactively wrap everything parsed since then in a new parent
    /// node — used by the math parser's Pratt loop to build left-leaning
    /// `BinOp` nodes without knowing up front that an infix operator
    /// would follow the left-hand side.
    pub(crate) fn checkpoint(&self) -> rowan::Checkpoint {
        self.builder.checkpoint()
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: rowan::Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
        self.depth += 1;
    }

    /// `finish()`: fails with an assertion if the parent stack is
    /// non-empty.
    pub(crate) fn finish(self, errors: Vec<Error>) -> Result<SyntaxTree, Error> {
        if self.depth != 0 {
            return Err(Error::assertion(format!(
                "finish called with {} unclosed node(s)",
                self.depth
            )));
        }
        Ok(SyntaxTree {
            root: crate::syntax_kind::SyntaxNode::new_root(self.builder.finish()),
            errors,
        })
    }
}

/// The result of a successful parse: the root of the lossless tree, plus
/// any errors accumulated along the way (there is at most one, since
/// parsing aborts at the first fault).
pub struct SyntaxTree {
    pub(crate) root: crate::syntax_kind::SyntaxNode,
    pub(crate) errors: Vec<Error>,
}

impl SyntaxTree {
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn syntax(&self) -> &crate::syntax_kind::SyntaxNode {
        &self.root
    }

    /// The lossless reconstruction of the whole tree: `concat(root)`.
    pub fn source_string(&self) -> String {
        self.root.text().to_string()
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn print(f: &mut fmt::Formatter<'_>, indent: usize, element: SyntaxElement) -> fmt::Result {
            let kind: SyntaxKind = element.kind();
            write!(f, "{:indent$}", "", indent = indent)?;
            match element {
                rowan::NodeOrToken::Node(node) => {
                    writeln!(f, "{:?}@{:?}", kind, node.text_range())?;
                    for child in node.children_with_tokens() {
                        print(f, indent + 2, child)?;
                    }
                    Ok(())
                }
                rowan::NodeOrToken::Token(token) => {
                    writeln!(f, "{:?}@{:?} {:?}", kind, token.text_range(), token.text())
                }
            }
        }

        print(f, 0, self.root.clone().into())?;
        for err in &self.errors {
            writeln!(f, "{err:?}")?;
        }
        Ok(())
    }
}
