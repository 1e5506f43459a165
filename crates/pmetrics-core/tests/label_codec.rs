//! Label block codec tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pmetrics_core::exposition::{escape_label_value, format_labels, format_labels_with_le};
use pmetrics_core::Labels;

fn labels(pairs: &[(&str, &str)]) -> Labels {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Minimal reader for `{k="v",...}` blocks, undoing the three escapes.
fn parse_block(block: &str) -> Labels {
    let mut out = Labels::new();
    if block.is_empty() {
        return out;
    }
    let inner = block
        .strip_prefix('{')
        .and_then(|b| b.strip_suffix('}'))
        .expect("block must be braced");

    let mut chars = inner.chars().peekable();
    while chars.peek().is_some() {
        let key: String = chars.by_ref().take_while(|c| *c != '=').collect();
        assert_eq!(chars.next(), Some('"'), "value must be quoted");
        let mut value = String::new();
        loop {
            match chars.next().expect("unterminated value") {
                '\\' => match chars.next().expect("dangling escape") {
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    'n' => value.push('\n'),
                    other => panic!("unexpected escape: \\{other}"),
                },
                '"' => break,
                c => value.push(c),
            }
        }
        out.insert(key, value);
        if chars.peek() == Some(&',') {
            chars.next();
        }
    }
    out
}

#[test]
fn empty_labels_render_nothing() {
    assert_eq!(format_labels(&Labels::new()), "");
    assert_eq!(format_labels_with_le(&Labels::new(), "+Inf"), "{le=\"+Inf\"}");
}

#[test]
fn keys_are_sorted() {
    let l = labels(&[("zone", "eu"), ("app", "db"), ("mode", "rw")]);
    assert_eq!(format_labels(&l), r#"{app="db",mode="rw",zone="eu"}"#);
}

#[test]
fn le_is_appended_last() {
    let l = labels(&[("zone", "eu"), ("app", "db")]);
    assert_eq!(format_labels_with_le(&l, "10"), r#"{app="db",zone="eu",le="10"}"#);
}

#[test]
fn escape_order_backslash_first() {
    assert_eq!(escape_label_value(r#"a\"b"#), r#"a\\\"b"#);
    assert_eq!(escape_label_value("a\\nb"), "a\\\\nb");
    assert_eq!(escape_label_value("line1\nline2"), "line1\\nline2");
}

#[test]
fn quoted_newline_scenario() {
    let l = labels(&[("msg", "say \"hi\"\nbye")]);
    let block = format_labels(&l);
    assert_eq!(block, r#"{msg="say \"hi\"\nbye"}"#);
    assert!(!block.contains('\n'));
}

#[test]
fn blocks_read_back_to_the_same_labels() {
    let cases = [
        labels(&[]),
        labels(&[("a", "")]),
        labels(&[("path", r"C:\temp\new"), ("q", "SELECT \"x\" FROM t")]),
        labels(&[("multi", "one\ntwo\\nthree"), ("comma", "a,b=c"), ("brace", "}{")]),
        labels(&[("unicode", "héllo ✓"), ("trail", "ends with \\")]),
    ];

    for l in cases {
        assert_eq!(parse_block(&format_labels(&l)), l, "labels={l:?}");
    }
}
