//! Splits raw model output into internal reasoning and the client memo.
//!
//! A reasoning block runs from an opening marker to the first closing marker
//! after it. The first block supplies the reasoning; every block is removed
//! from the memo. An opening marker with no closing marker after it is not a
//! block and stays in the memo as plain text.

use std::ops::Range;

/// Opening marker of a reasoning block.
pub const REASONING_OPEN: &str = "<reasoning>";
/// Closing marker of a reasoning block.
pub const REASONING_CLOSE: &str = "</reasoning>";
/// Reasoning reported when the model produced no block.
pub const NO_REASONING_SENTINEL: &str = "Model did not output hidden reasoning tags.";

/// Reasoning and memo derived from one raw response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedAnalysis {
    /// Trimmed content of the first block, or [`NO_REASONING_SENTINEL`].
    pub reasoning: String,
    /// Raw response without any reasoning block, trimmed.
    pub memo: String,
}

struct Block {
    /// Whole block, markers included.
    outer: Range<usize>,
    /// Content between the markers.
    inner: Range<usize>,
}

fn next_block(haystack: &str) -> Option<Block> {
    let start = haystack.find(REASONING_OPEN)?;
    let inner_start = start + REASONING_OPEN.len();
    let inner_end = inner_start + haystack[inner_start..].find(REASONING_CLOSE)?;
    Some(Block {
        outer: start..inner_end + REASONING_CLOSE.len(),
        inner: inner_start..inner_end,
    })
}

/// Remove every reasoning block, scanning left to right without overlap.
#[must_use]
pub fn strip_reasoning_blocks(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(block) = next_block(rest) {
        out.push_str(&rest[..block.outer.start]);
        rest = &rest[block.outer.end..];
    }
    out.push_str(rest);
    out
}

/// Split a raw model response.
#[must_use]
pub fn split_response(raw: &str) -> ParsedAnalysis {
    let Some(first) = next_block(raw) else {
        return ParsedAnalysis {
            reasoning: NO_REASONING_SENTINEL.to_string(),
            memo: raw.trim().to_string(),
        };
    };

    ParsedAnalysis {
        reasoning: raw[first.inner].trim().to_string(),
        memo: strip_reasoning_blocks(raw).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::Regex;

    fn parsed(reasoning: &str, memo: &str) -> ParsedAnalysis {
        ParsedAnalysis {
            reasoning: reasoning.to_string(),
            memo: memo.to_string(),
        }
    }

    #[test]
    fn test_single_block() {
        assert_eq!(
            split_response("<reasoning>loophole X</reasoning>Memo body."),
            parsed("loophole X", "Memo body.")
        );
    }

    #[test]
    fn test_no_block_uses_sentinel() {
        assert_eq!(
            split_response("Memo only, no tags."),
            parsed(NO_REASONING_SENTINEL, "Memo only, no tags.")
        );
        assert_eq!(
            split_response("\n  Memo only.  \n"),
            parsed(NO_REASONING_SENTINEL, "Memo only.")
        );
    }

    #[test]
    fn test_multiple_blocks_all_removed_first_kept() {
        assert_eq!(
            split_response("<reasoning>A</reasoning>Part1<reasoning>B</reasoning>Part2"),
            parsed("A", "Part1Part2")
        );
    }

    #[test]
    fn test_multiline_reasoning_is_trimmed() {
        let raw = "<reasoning>\n  Issue: breach.\n  Rule: UCC 2-601.\n</reasoning>\n\nDear Client,\nYou may reject.\n";
        assert_eq!(
            split_response(raw),
            parsed(
                "Issue: breach.\n  Rule: UCC 2-601.",
                "Dear Client,\nYou may reject."
            )
        );
    }

    #[test]
    fn test_block_ends_at_first_close_marker() {
        let raw = "<reasoning>one</reasoning>mid</reasoning>end";
        assert_eq!(split_response(raw), parsed("one", "mid</reasoning>end"));
    }

    #[test]
    fn test_unterminated_open_marker_is_no_match() {
        let raw = "Intro.\n<reasoning>never closed";
        assert_eq!(split_response(raw), parsed(NO_REASONING_SENTINEL, raw.trim()));
        assert_eq!(
            split_response("<reasoning>"),
            parsed(NO_REASONING_SENTINEL, "<reasoning>")
        );
    }

    #[test]
    fn test_dangling_open_marker_after_block_stays_in_memo() {
        let raw = "<reasoning>A</reasoning>Memo <reasoning>tail";
        assert_eq!(split_response(raw), parsed("A", "Memo <reasoning>tail"));
    }

    #[test]
    fn test_empty_block_is_not_sentinel() {
        assert_eq!(
            split_response("<reasoning></reasoning>Memo."),
            parsed("", "Memo.")
        );
        assert_eq!(
            split_response("<reasoning>   </reasoning>Memo."),
            parsed("", "Memo.")
        );
    }

    #[test]
    fn test_nested_open_marker_belongs_to_first_block() {
        let raw = "<reasoning>a<reasoning>b</reasoning>memo";
        assert_eq!(split_response(raw), parsed("a<reasoning>b", "memo"));
    }

    #[test]
    fn test_only_reasoning_gives_empty_memo() {
        assert_eq!(split_response("<reasoning>x</reasoning>"), parsed("x", ""));
    }

    fn text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,\n]{0,40}"
    }

    fn fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(REASONING_OPEN.to_string()),
            Just(REASONING_CLOSE.to_string()),
            "[a-z \n]{0,6}",
        ]
    }

    fn mixed() -> impl Strategy<Value = String> {
        proptest::collection::vec(fragment(), 0..10).prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_single_block_resplits_to_same_reasoning(
            pre in text(),
            inner in text(),
            post in text(),
        ) {
            let raw = format!("{pre}{REASONING_OPEN}{inner}{REASONING_CLOSE}{post}");
            let outside = format!("{pre}{post}");
            let first = split_response(&raw);
            prop_assert_eq!(first.reasoning.as_str(), inner.trim());
            prop_assert_eq!(first.memo.as_str(), outside.trim());

            let rebuilt = format!("{REASONING_OPEN}{}{REASONING_CLOSE}{}", first.reasoning, first.memo);
            prop_assert_eq!(split_response(&rebuilt).reasoning, first.reasoning);
        }

        #[test]
        fn prop_no_markers_is_sentinel_and_trimmed_input(raw in text()) {
            let result = split_response(&raw);
            prop_assert_eq!(result.reasoning, NO_REASONING_SENTINEL);
            prop_assert_eq!(result.memo, raw.trim());
        }

        #[test]
        fn prop_many_blocks_leave_no_markers(
            blocks in proptest::collection::vec((text(), text()), 2..5),
            tail in text(),
        ) {
            let mut raw = String::new();
            for (outside, inside) in &blocks {
                raw.push_str(outside);
                raw.push_str(REASONING_OPEN);
                raw.push_str(inside);
                raw.push_str(REASONING_CLOSE);
            }
            raw.push_str(&tail);

            let result = split_response(&raw);
            prop_assert!(!result.memo.contains(REASONING_OPEN));
            prop_assert!(!result.memo.contains(REASONING_CLOSE));
            prop_assert_eq!(result.reasoning, blocks[0].1.trim());
        }

        #[test]
        fn prop_unterminated_open_marker_is_untouched(pre in text(), tail in text()) {
            let raw = format!("{pre}{REASONING_OPEN}{tail}");
            let result = split_response(&raw);
            prop_assert_eq!(result.reasoning, NO_REASONING_SENTINEL);
            prop_assert_eq!(result.memo, raw.trim());
        }

        #[test]
        fn prop_matches_non_greedy_regex(raw in mixed()) {
            let Ok(block) = Regex::new(r"(?s)<reasoning>(.*?)</reasoning>") else {
                return Err(TestCaseError::fail("oracle regex must compile"));
            };
            let expected = block.captures(&raw).map_or_else(
                || parsed(NO_REASONING_SENTINEL, raw.trim()),
                |caps| parsed(
                    caps.get(1).map_or("", |m| m.as_str()).trim(),
                    block.replace_all(&raw, "").trim(),
                ),
            );
            prop_assert_eq!(split_response(&raw), expected);
        }
    }
}
