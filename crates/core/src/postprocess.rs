//! Budget-aware postprocessing of generated summaries.
//!
//! Generated text is cut back to whole sentences so that a summary never ends
//! mid-sentence. Two strategies exist, one per [`SummaryTarget`] variant.

use crate::sentence::split_sentences;
use crate::target::SummaryTarget;

/// Greedily packs whole sentences into a character budget.
///
/// A sentence is added while `current + chars(sentence) + 1 <= budget`, the
/// `+ 1` paying for the joining space. Packing stops at the first sentence
/// that does not fit, so if the first sentence alone is over budget the
/// result is empty. Characters are Unicode scalar values.
///
/// # Example
///
/// ```rust
/// use gist_core::pack_by_chars;
///
/// let raw = "짧은 문장입니다. 두 번째 문장입니다. 세 번째 긴 문장이 이어집니다.";
/// assert_eq!(pack_by_chars(raw, 100), raw);
/// assert_eq!(pack_by_chars(raw, 22), "짧은 문장입니다. 두 번째 문장입니다.");
/// assert_eq!(pack_by_chars(raw, 5), "");
/// ```
pub fn pack_by_chars(raw: &str, budget: usize) -> String {
    let mut packed: Vec<String> = Vec::new();
    let mut current_length = 0usize;

    for sentence in split_sentences(raw) {
        let cost = sentence.chars().count() + 1;
        if current_length + cost > budget {
            break;
        }
        current_length += cost;
        packed.push(sentence);
    }

    packed.join(" ")
}

/// Takes the first `lines` sentences verbatim, one per line.
///
/// Returns every sentence when fewer than `lines` exist.
///
/// # Example
///
/// ```rust
/// use gist_core::pack_by_lines;
///
/// assert_eq!(pack_by_lines("하나. 둘. 셋.", 2), "하나.\n둘.");
/// assert_eq!(pack_by_lines("하나. 둘.", 5), "하나.\n둘.");
/// ```
pub fn pack_by_lines(raw: &str, lines: usize) -> String {
    split_sentences(raw).into_iter().take(lines).collect::<Vec<_>>().join("\n")
}

impl SummaryTarget {
    /// Applies the postprocessing strategy that matches this target.
    pub fn postprocess(&self, raw: &str) -> String {
        match *self {
            SummaryTarget::ByChars(budget) => pack_by_chars(raw, budget),
            SummaryTarget::ByLines(lines) => pack_by_lines(raw, lines),
        }
    }
}
