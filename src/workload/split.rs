//! Line-range partitioning of a source document.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Line ranges covered by each of `partitions` partitions of a document with
/// `total_lines` lines.
///
/// Every range but the last spans `ceil(total_lines / partitions)` lines. The
/// last one takes whatever is left, which may be fewer lines or none at all.
/// Ranges are contiguous and together cover `0..total_lines` exactly once.
pub fn partition_bounds(total_lines: usize, partitions: NonZeroUsize) -> Vec<Range<usize>> {
    let n = partitions.get();
    let chunk_size = total_lines.div_ceil(n);
    (0..n)
        .map(|i| {
            let start = (i * chunk_size).min(total_lines);
            let end = if i + 1 == n {
                total_lines
            } else {
                ((i + 1) * chunk_size).min(total_lines)
            };
            start..end
        })
        .collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Lines of `text` without their terminators.
///
/// `\r\n` is one terminator. A lone `\r`, `\n`, vertical tab, form feed,
/// the file/group/record separators, NEL and the Unicode line and paragraph
/// separators each end a line too. A terminator at the very end does not
/// start another, empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(end) = rest.find(is_line_break) {
        lines.push(&rest[..end]);
        let tail = &rest[end..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[width..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Splits `text` into exactly `partitions` pieces of contiguous lines.
///
/// Lines inside a piece are joined with `\n`; an empty range yields an empty
/// string, which is still a valid partition.
pub fn partition(text: &str, partitions: NonZeroUsize) -> Vec<String> {
    let lines = split_lines(text);
    partition_bounds(lines.len(), partitions)
        .into_iter()
        .map(|range| lines[range].join("\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn n(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).unwrap()
    }

    #[rstest]
    #[case(0, vec![0..0, 0..0, 0..0])]
    #[case(1, vec![0..1, 1..1, 1..1])]
    #[case(2, vec![0..1, 1..2, 2..2])]
    #[case(3, vec![0..1, 1..2, 2..3])]
    #[case(4, vec![0..2, 2..4, 4..4])]
    #[case(7, vec![0..3, 3..6, 6..7])]
    #[case(9, vec![0..3, 3..6, 6..9])]
    fn three_way_bounds(#[case] lines: usize, #[case] expected: Vec<Range<usize>>) {
        assert_eq!(partition_bounds(lines, n(3)), expected);
    }

    #[test]
    fn one_line_per_partition() {
        let parts = partition("apple banana\napple\nbanana banana", n(3));
        assert_eq!(parts, vec!["apple banana", "apple", "banana banana"]);
    }

    #[test]
    fn short_documents_produce_empty_partitions() {
        let parts = partition("only line\n", n(3));
        assert_eq!(parts, vec!["only line", "", ""]);
        assert_eq!(partition("", n(3)), vec!["", "", ""]);
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let parts = partition("a\r\nb\r\nc\r\nd", n(2));
        assert_eq!(parts, vec!["a\nb", "c\nd"]);
    }

    #[rstest]
    #[case("a\rb", vec!["a", "b"])]
    #[case("a\x0bb\x0cc", vec!["a", "b", "c"])]
    #[case("a\x1cb\x1dc\x1ed", vec!["a", "b", "c", "d"])]
    #[case("a\u{85}b\u{2028}c\u{2029}d", vec!["a", "b", "c", "d"])]
    #[case("a\r\n\r\nb", vec!["a", "", "b"])]
    #[case("a\n\rb", vec!["a", "", "b"])]
    #[case("a\u{2028}", vec!["a"])]
    #[case("\n", vec![""])]
    #[case("", vec![])]
    fn line_terminators(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_lines(text), expected);
    }

    #[test]
    fn lone_carriage_returns_and_form_feeds_break_lines() {
        let parts = partition("a\rb\x0cc\u{2029}d", n(2));
        assert_eq!(parts, vec!["a\nb", "c\nd"]);
    }

    #[test]
    fn single_partition_keeps_everything() {
        let parts = partition("x\ny\nz", n(1));
        assert_eq!(parts, vec!["x\ny\nz"]);
    }

    proptest! {
        #[test]
        fn partitions_reassemble_the_document(
            lines in prop::collection::vec(("[a-z ]{0,12}", any::<bool>()), 0..40),
            trailing in any::<bool>(),
            parts in 1usize..6,
        ) {
            let mut text = String::new();
            for (i, (line, crlf)) in lines.iter().enumerate() {
                text.push_str(line);
                if i + 1 < lines.len() || trailing {
                    text.push_str(if *crlf { "\r\n" } else { "\n" });
                }
            }
            let mut expected: Vec<&str> = lines.iter().map(|(line, _)| line.as_str()).collect();
            if !trailing && expected.last().is_some_and(|line| line.is_empty()) {
                expected.pop();
            }

            let pieces = partition(&text, n(parts));
            let bounds = partition_bounds(expected.len(), n(parts));
            prop_assert_eq!(pieces.len(), parts);

            let mut reassembled: Vec<&str> = Vec::new();
            for (piece, range) in pieces.iter().zip(&bounds) {
                if range.is_empty() {
                    prop_assert_eq!(piece.as_str(), "");
                } else {
                    reassembled.extend(piece.split('\n'));
                }
            }
            prop_assert_eq!(reassembled, expected);
        }

        #[test]
        fn no_partition_exceeds_the_chunk_size(
            total in 0usize..500,
            parts in 1usize..8,
        ) {
            let chunk_size = total.div_ceil(parts);
            let bounds = partition_bounds(total, n(parts));
            for range in &bounds[..parts - 1] {
                prop_assert!(range.len() == chunk_size || range.end == total);
            }
            prop_assert!(bounds[parts - 1].len() <= chunk_size);
        }
    }
}
