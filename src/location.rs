//! Maps an absolute byte offset in a source string to a 1-indexed
//! `(row, col)` pair.

/// Precomputed line-start offsets for a source string, so repeated
/// `locate` calls don't each re-scan from the beginning.
///
/// Line terminators count toward the line they end: a line runs from
/// its start offset (the byte right after the previous `\n`, or `0`) up
/// to and including its own `\n`.
pub(crate) struct SourceMap<'a> {
    source: &'a str,
    /// Byte offset of the first byte of each line, in increasing order.
    /// Always starts with `0`.
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { source, line_starts }
    }

    /// Map `offset` to a 1-indexed `(row, col)`. Fails if `offset` is out
    /// of bounds for the source.
    pub(crate) fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        if offset >= self.source.len() {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };
        let col = offset - self.line_starts[line] + 1;
        Some((line + 1, col))
    }
}

#[cfg(test)]
mod test {
    use super::SourceMap;

    #[test]
    fn single_line() {
        let map = SourceMap::new("hello");
        assert_eq!(map.locate(0), Some((1, 1)));
        assert_eq!(map.locate(4), Some((1, 5)));
        assert_eq!(map.locate(5), None);
    }

    #[test]
    fn multi_line() {
        let source = "ab\ncd\nef";
        let map = SourceMap::new(source);
        assert_eq!(map.locate(0), Some((1, 1)));
        assert_eq!(map.locate(2), Some((1, 3))); // the '\n' itself
        assert_eq!(map.locate(3), Some((2, 1))); // 'c'
        assert_eq!(map.locate(5), Some((2, 3))); // second '\n'
        assert_eq!(map.locate(6), Some((3, 1))); // 'e'
        assert_eq!(map.locate(7), Some((3, 2))); // 'f'
    }

    #[test]
    fn byte_at_offset_matches_line_and_col() {
        let source = "one\ntwo\nthree";
        let map = SourceMap::new(source);
        for (offset, expected) in source.bytes().enumerate() {
            let (row, col) = map.locate(offset).unwrap();
            let line = source.split('\n').nth(row - 1).unwrap();
            // the line as split on '\n' does not include the terminator,
            // so the terminator itself resolves one column past its end
            let byte = line.as_bytes().get(col - 1).copied().unwrap_or(b'\n');
            assert_eq!(byte, expected, "offset {offset}");
        }
    }
}
