//! Label block codec.
//!
//! `{}` is never emitted: an empty label set renders as nothing at all.

use crate::sample::Labels;

/// Escape a label value. Backslash goes first so the backslashes added for
/// quotes and newlines are not escaped a second time.
pub fn escape_label_value(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// `{k1="v1",k2="v2"}` in key order, or `""` when there are no labels.
pub fn format_labels(labels: &Labels) -> String {
    if labels.is_empty() {
        return String::new();
    }
    format!("{{{}}}", pairs(labels).join(","))
}

/// Label block with an extra `le` pair appended after the series labels.
pub fn format_labels_with_le(labels: &Labels, le: &str) -> String {
    let mut pairs = pairs(labels);
    pairs.push(format!("le=\"{}\"", escape_label_value(le)));
    format!("{{{}}}", pairs.join(","))
}

fn pairs(labels: &Labels) -> Vec<String> {
    labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect()
}
