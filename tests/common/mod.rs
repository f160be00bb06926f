#![allow(dead_code)]

use std::path::PathBuf;

use ngx_config::{parse_file, Directive, ParseOptions, Payload, Registry};

pub fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(rel)
}

pub fn parse_fixture(rel: &str, options: &ParseOptions) -> Payload {
    let registry = Registry::standard();
    parse_file(fixture(rel), &registry, options).expect("parse should not fail outright")
}

/// Remove every `line` field so trees can be compared modulo line numbers.
pub fn strip_lines(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("line");
            for v in map.values_mut() {
                strip_lines(v);
            }
        }
        serde_json::Value::Array(items) => {
            for v in items {
                strip_lines(v);
            }
        }
        _ => {}
    }
}

/// Trees equal ignoring `line` (and nothing else).
pub fn assert_trees_match(a: &[Directive], b: &[Directive]) {
    let mut va = serde_json::to_value(a).expect("serialize");
    let mut vb = serde_json::to_value(b).expect("serialize");
    strip_lines(&mut va);
    strip_lines(&mut vb);
    assert_eq!(va, vb);
}

/// Walk a tree depth-first, visiting every directive.
pub fn walk<'a>(block: &'a [Directive], visit: &mut dyn FnMut(&'a Directive)) {
    for stmt in block {
        visit(stmt);
        if let Some(inner) = &stmt.block {
            walk(inner, visit);
        }
    }
}
