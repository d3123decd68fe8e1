//! Remittance-information merging.
//!
//! 001.08 in this profile carries unstructured remittance text only. The
//! merger folds the source's structured entries into the unstructured list
//! and appends the document-level fallback narrative when no richer text
//! would otherwise close the list.

use crate::tree::Element;

/// Build the target's unstructured-text list.
///
/// In order: every source `Ustrd`; per source `Strd`, its `AddtlRmtInf`
/// sub-fields; then the fallback exactly once, if non-empty and not already
/// the last element. The result always has at least one element — in the
/// degenerate case (nothing in the source, empty fallback) it holds a single
/// empty string so the `RmtInf/Ustrd` element still exists downstream.
pub(crate) fn merge(remittance: Option<&Element>, fallback: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(rmt) = remittance {
        for unstructured in rmt.children_of("Ustrd") {
            if let Some(text) = unstructured.text() {
                lines.push(text.to_string());
            }
        }
        for structured in rmt.children_of("Strd") {
            for info in structured.children_of("AddtlRmtInf") {
                if let Some(text) = info.text() {
                    lines.push(text.to_string());
                }
            }
        }
    }
    if !fallback.is_empty() && lines.last().map(String::as_str) != Some(fallback) {
        lines.push(fallback.to_string());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Render a merged list as a `RmtInf` element, one `Ustrd` per line.
///
/// Singular vs. plural is decided here purely by the number of lines; the
/// merger itself always works on a sequence.
pub(crate) fn to_element(lines: &[String]) -> Element {
    let mut rmt = Element::new("RmtInf");
    for line in lines {
        rmt.push_child(Element::with_text("Ustrd", line));
    }
    rmt
}
