// Region markers are the `[IMG<n>]` section headers of a .til file.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one region-marker header, e.g. `[IMG12]`.
pub(crate) static REGION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[IMG\d+\]").expect("region marker pattern is valid"));

/// Header that opens the global section carried through regeneration.
pub(crate) const GLOBAL_HEADER: &str = "[GLOBAL]";

/// Count the region markers in `content`.
///
/// Only the count is reported; it is informational and has no bearing on how many
/// blocks [`crate::regenerate`] will emit.
pub fn analyze(content: &str) -> usize {
    REGION_MARKER.find_iter(content).count()
}

/// Byte offset of the first region marker in `content`, if any.
pub(crate) fn first_region_marker(content: &str) -> Option<usize> {
    REGION_MARKER.find(content).map(|m| m.start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("", 0)]
    #[case::no_markers("[GLOBAL]\nFOO=1\n", 0)]
    #[case::single("[IMG1]\nSOURCE_RECT=1,2,3,4", 1)]
    #[case::several("[GLOBAL]\n\n[IMG1]\n\n[IMG2]\n\n[IMG10]\n", 3)]
    #[case::adjacent("[IMG1][IMG2]", 2)]
    #[case::needs_digits("[IMG]\n[IMGa]\n[img1]", 0)]
    #[case::unterminated("[IMG12\nSOURCE_RECT=0,0,0,0", 0)]
    #[case::inline_text("see [IMG3] below", 1)]
    fn counts_region_markers(#[case] content: &str, #[case] expected: usize) {
        assert_eq!(analyze(content), expected);
    }

    #[test]
    fn finds_first_marker_offset() {
        assert_eq!(first_region_marker("[GLOBAL]\n[IMG]\n[IMG4]"), Some(15));
        assert_eq!(first_region_marker("[GLOBAL]"), None);
    }

    proptest! {
        #[test]
        fn count_matches_number_of_inserted_markers(
            indices in proptest::collection::vec(0u32..10_000, 0..20),
            filler in "[a-z =,0-9\n]{0,16}",
        ) {
            let content: String = indices
                .iter()
                .map(|i| format!("{filler}[IMG{i}]\n"))
                .collect();
            prop_assert_eq!(analyze(&content), indices.len());
        }

        #[test]
        fn analyze_never_panics(s in "\\PC*") {
            let _count = analyze(&s);
        }
    }
}
