//! A generic lexer engine driven by an ordered, enum-indexed table of
//! matchers. [`crate::latex::token`] and [`crate::math::token`] each
//! supply a concrete [`TokenGrammar`] built on top of this module.

mod cursor;

pub(crate) use cursor::Cursor;

use crate::error::Error;

/// A lexed token: the exact source slice it spans, its absolute byte
/// offset, and an optional kind-specific payload (e.g. a command name).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'a, K> {
    pub kind: K,
    pub data: Option<&'a str>,
    pub source: &'a str,
    pub offset: usize,
}

impl<K: std::fmt::Debug> std::fmt::Debug for Token<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}@{}:{} {:?}",
            self.kind,
            self.offset,
            self.offset + self.source.len(),
            self.source
        )
    }
}

/// The outcome of a procedural matcher: the token kind it produced, plus
/// the absolute byte range of the kind-specific payload, if any.
pub(crate) struct ProceduralMatch<K> {
    pub(crate) kind: K,
    pub(crate) data: Option<(usize, usize)>,
}

/// A single entry of a matcher table.
///
/// `Pattern` is a regular-language matcher anchored at the cursor: given
/// the unconsumed remainder of the source, it returns the length of the
/// longest prefix it accepts, or `None`. A `Pattern` match never carries
/// a payload (`data` is always absent).
///
/// `Procedural` is an escape hatch for token shapes a longest-prefix rule
/// can't express cleanly (this grammar's `Command` token is one): it
/// drives the cursor directly and decides its own payload range.
pub(crate) enum Matcher<K> {
    Pattern(fn(&str) -> Option<usize>, K),
    Procedural(fn(&mut Cursor) -> Result<Option<ProceduralMatch<K>>, Error>),
}

/// A concrete token grammar: a closed token-kind type plus the ordered
/// matcher table that recognizes it. Matchers are tried in declaration
/// order — put specific patterns before catch-alls.
pub(crate) trait TokenGrammar: Copy + Eq + std::fmt::Debug {
    const MATCHERS: &'static [Matcher<Self>];
}

/// Drives a [`TokenGrammar`]'s matcher table over a source string.
pub(crate) struct Lexer<'a, G: TokenGrammar> {
    source: &'a str,
    cursor: Cursor<'a>,
    _grammar: std::marker::PhantomData<G>,
}

impl<'a, G: TokenGrammar> Lexer<'a, G> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            _grammar: std::marker::PhantomData,
        }
    }

    /// Produce the next token, or `None` at end of input *or* when no
    /// matcher in the table accepts what remains — the two cases are
    /// distinguishable only by checking whether the cursor is actually
    /// at the end of the source (see [`Lexer::tokenize`]).
    pub(crate) fn next_token(&mut self) -> Result<Option<Token<'a, G>>, Error> {
        if self.cursor.is_eof() {
            return Ok(None);
        }

        let start = self.cursor.pos();
        for matcher in G::MATCHERS {
            match matcher {
                Matcher::Pattern(pattern, kind) => {
                    if let Some(len) = pattern(self.cursor.rest()) {
                        self.cursor.advance_by(len);
                        return Ok(Some(Token {
                            kind: *kind,
                            data: None,
                            source: &self.source[start..start + len],
                            offset: start,
                        }));
                    }
                }
                Matcher::Procedural(matcher) => {
                    let mut probe = self.cursor;
                    if let Some(m) = matcher(&mut probe)? {
                        self.cursor = probe;
                        return Ok(Some(Token {
                            kind: m.kind,
                            data: m.data.map(|(s, e)| &self.source[s..e]),
                            source: &self.source[start..self.cursor.pos()],
                            offset: start,
                        }));
                    }
                }
            }
        }

        Ok(None)
    }

    /// Repeatedly invoke [`Lexer::next_token`] until end of input, and
    /// return the accumulated ordered token sequence. If a matcher
    /// raises a hard lex error, tokenizing stops there. If no matcher
    /// ever raises an error but some input is left over because no
    /// matcher in the table accepted it, that leftover is reported as a
    /// trailing lex error too — the table is expected to be exhaustive
    /// over valid input, so whatever remains is the lexical fault.
    pub(crate) fn tokenize(mut self) -> (Vec<Token<'a, G>>, Vec<Error>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            match self.next_token() {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) => break,
                Err(err) => {
                    errors.push(err);
                    break;
                }
            }
        }

        if errors.is_empty() && !self.cursor.is_eof() {
            let rest = self.cursor.rest();
            errors.push(Error::lex(
                "unrecognized input",
                rest.chars().next().unwrap_or_default().to_string(),
                self.cursor.pos(),
            ));
        }

        (tokens, errors)
    }
}
