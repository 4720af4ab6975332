//! C6: a generic parser engine — a cursor over an already-tokenized
//! buffer, with one-token lookahead and an embedded [`SyntaxTreeBuilder`].
//! [`crate::latex::grammar`] and [`crate::math::grammar`] are the two
//! concrete grammars built on top of it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::builder::{SyntaxTree, SyntaxTreeBuilder};
use crate::error::Error;
use crate::lexer::{Token, TokenGrammar};
use crate::limit::LimitTracker;
use crate::location::SourceMap;
use crate::syntax_kind::SyntaxKind;

/// Recursion depth at which the LaTeX and math grammars give up rather
/// than blow the stack on a pathologically nested input.
pub(crate) const DEFAULT_RECURSION_LIMIT: usize = 500;

/// A token kind that knows which [`SyntaxKind`] it is pushed into the
/// tree as. Kept separate from [`TokenGrammar`] so the lexer engine (C2)
/// has no dependency on the tree representation (C5); only the parser
/// engine (C6), which sits between them, needs the mapping.
pub(crate) trait IntoSyntaxKind: Copy {
    fn into_syntax(self) -> SyntaxKind;
}

/// A generic recursive-descent parser over a token buffer of grammar
/// `G`. Owns the embedded tree builder and accumulated errors; grammar
/// modules drive it with `peek`/`at`/`consume`/`expect`/... and call
/// `start_node`/`checkpoint` around the productions they build.
pub(crate) struct Parser<'input, G: TokenGrammar + IntoSyntaxKind> {
    source: &'input str,
    tokens: Vec<Token<'input, G>>,
    idx: usize,
    builder: Rc<RefCell<SyntaxTreeBuilder>>,
    recursion_limit: LimitTracker,
    /// Errors accumulated during this parse. A grammar production never
    /// gets a chance to push onto this: it reports a fault by returning
    /// `Err` from the production function, which short-circuits via `?`
    /// all the way out of `parse()` before `finish` is ever reached (§7
    /// of the design: no recovery). `finish` therefore only ever sees
    /// this empty, but it's still threaded through to
    /// [`SyntaxTreeBuilder::finish`] so [`SyntaxTree::errors`] has a
    /// place to read from.
    errors: Vec<Error>,
}

impl<'input, G: TokenGrammar + IntoSyntaxKind> Parser<'input, G> {
    pub(crate) fn new(source: &'input str, tokens: Vec<Token<'input, G>>) -> Self {
        Self {
            source,
            tokens,
            idx: 0,
            builder: Rc::new(RefCell::new(SyntaxTreeBuilder::new())),
            recursion_limit: LimitTracker::new(DEFAULT_RECURSION_LIMIT),
            errors: Vec::new(),
        }
    }

    /// `peek()`: the current token's kind, or `None` at the end of the
    /// buffer.
    pub(crate) fn peek(&self) -> Option<G> {
        self.tokens.get(self.idx).map(|t| t.kind)
    }

    pub(crate) fn peek_token(&self) -> Option<&Token<'input, G>> {
        self.tokens.get(self.idx)
    }

    /// `data` carried by the current token, if any (e.g. a command name).
    pub(crate) fn peek_data(&self) -> Option<&'input str> {
        self.peek_token().and_then(|t| t.data)
    }

    pub(crate) fn at(&self, kind: G) -> bool {
        self.peek() == Some(kind)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    /// Recursion-limit guard around a production; grammars call this at
    /// the top of every recursive rule.
    pub(crate) fn limit_err(&mut self) -> Result<(), Error> {
        self.recursion_limit.consume();
        if self.recursion_limit.limited() {
            return Err(self.err_at_current("recursion limit reached"));
        }
        Ok(())
    }

    /// `consume()`: append the current token to the tree as-is, and
    /// advance. Fails if at end.
    pub(crate) fn consume(&mut self) -> Result<(), Error> {
        let token = self.current_or_eof_err("unexpected end of input")?;
        self.builder
            .borrow_mut()
            .token(token.kind.into_syntax(), token.source);
        self.idx += 1;
        Ok(())
    }

    /// `ignore()`: advance without appending to the tree. Used to drop
    /// delimiters a grouping node already conveys structurally.
    pub(crate) fn ignore(&mut self) -> Result<(), Error> {
        self.current_or_eof_err("unexpected end of input")?;
        self.idx += 1;
        Ok(())
    }

    /// `expect(kind)`: like `consume`, but fails with a `ParseError` if
    /// the current token's kind doesn't match.
    pub(crate) fn expect(&mut self, kind: G) -> Result<(), Error> {
        if self.at(kind) {
            self.consume()
        } else {
            Err(self.expected_err(&format!("{kind:?}")))
        }
    }

    /// `expect2(k1, k2)`: accept either kind.
    pub(crate) fn expect2(&mut self, k1: G, k2: G) -> Result<(), Error> {
        if self.at(k1) || self.at(k2) {
            self.consume()
        } else {
            Err(self.expected_err(&format!("{k1:?} or {k2:?}")))
        }
    }

    /// `expect_ignore(kind)`: validate the kind, then advance without
    /// appending to the tree.
    pub(crate) fn expect_ignore(&mut self, kind: G) -> Result<(), Error> {
        if self.at(kind) {
            self.ignore()
        } else {
            Err(self.expected_err(&format!("{kind:?}")))
        }
    }

    fn current_or_eof_err(&self, message: &str) -> Result<&Token<'input, G>, Error> {
        self.peek_token()
            .ok_or_else(|| self.err_at_offset(message, self.source.len()))
    }

    fn expected_err(&self, expected: &str) -> Error {
        let (found, offset) = match self.peek_token() {
            Some(t) => (format!("{:?}", t.kind), t.offset),
            None => ("end of input".to_string(), self.source.len()),
        };
        let (row, col) = SourceMap::new(self.source)
            .locate(offset)
            .unwrap_or((1, 1));
        Error::parse(
            format!("Expected {expected} at {row}:{col}, found {found} instead"),
            found,
            offset,
        )
    }

    /// Build a `ParseError` anchored at the current token (or end of
    /// input), with a caller-supplied message, row/col already resolved.
    pub(crate) fn err_at_current(&self, message: &str) -> Error {
        match self.peek_token() {
            Some(t) => self.err_at_offset(message, t.offset),
            None => self.err_at_offset(message, self.source.len()),
        }
    }

    fn err_at_offset(&self, message: &str, offset: usize) -> Error {
        let (row, col) = SourceMap::new(self.source)
            .locate(offset)
            .unwrap_or((1, 1));
        let data = self
            .peek_token()
            .map(|t| t.source.to_string())
            .unwrap_or_else(|| "EOF".to_string());
        Error::parse(format!("{message} at {row}:{col}"), data, offset)
    }

    /// `start_node(kind)`: open a node, returning a guard that closes it
    /// on drop (or via an explicit `finish`, which just closes it early).
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) -> NodeGuard {
        self.builder.borrow_mut().start_node(kind);
        NodeGuard {
            builder: Rc::clone(&self.builder),
            finished: false,
        }
    }

    /// A checkpoint into the builder's pending-children buffer, for
    /// retroactively wrapping everything parsed since then — the device
    /// the math parser's Pratt loop uses to build left-leaning `BinOp`
    /// nodes.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            builder: Rc::clone(&self.builder),
            checkpoint: self.builder.borrow().checkpoint(),
        }
    }

    /// Finish parsing: hand back the tree and whatever errors were
    /// accumulated. Fails if the builder's parent stack isn't empty
    /// (I4), turning a would-be panic into an `AssertionError`.
    pub(crate) fn finish(self) -> Result<SyntaxTree, Error> {
        let builder = Rc::try_unwrap(self.builder)
            .map_err(|_| Error::assertion("builder still has outstanding node guards"))?
            .into_inner();
        builder.finish(self.errors)
    }
}

/// RAII guard for an open node: closes it when dropped. Mirrors the
/// teacher's `NodeGuard`, generalized away from a concrete grammar.
pub(crate) struct NodeGuard {
    builder: Rc<RefCell<SyntaxTreeBuilder>>,
    finished: bool,
}

impl NodeGuard {
    /// Close the node now rather than waiting for drop.
    pub(crate) fn finish(mut self) -> Result<(), Error> {
        self.finish_inner()
    }

    fn finish_inner(&mut self) -> Result<(), Error> {
        if !self.finished {
            self.finished = true;
            self.builder.borrow_mut().finish_node()?;
        }
        Ok(())
    }
}

impl Drop for NodeGuard {
    fn drop(&mut self) {
        // a drop can't propagate a Result; grammars that need the
        // assertion checked call `finish()` explicitly instead.
        let _ = self.finish_inner();
    }
}

/// A saved position in the builder's pending-children buffer, for
/// wrapping everything parsed since the checkpoint in a new parent node
/// built after the fact — e.g. `2 + 2` is parsed as two siblings before
/// the parser knows a `BinOp` needs to wrap them.
#[derive(Clone)]
pub(crate) struct Checkpoint {
    builder: Rc<RefCell<SyntaxTreeBuilder>>,
    checkpoint: rowan::Checkpoint,
}

impl Checkpoint {
    pub(crate) fn wrap_node(self, kind: SyntaxKind) -> NodeGuard {
        self.builder
            .borrow_mut()
            .start_node_at(self.checkpoint, kind);
        NodeGuard {
            builder: self.builder,
            finished: false,
        }
    }
}
