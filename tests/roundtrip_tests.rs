mod common;

use common::{assert_trees_match, fixture};
use ngx_config::{build, parse_file, BuildOptions, Directive, ParseOptions, Registry, Status};
use std::path::Path;

fn reparse(text: &str, registry: &Registry, options: &ParseOptions) -> Vec<Directive> {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nginx.conf");
    std::fs::write(&path, text).expect("write");
    let payload = parse_file(&path, registry, options).expect("parse");
    assert_eq!(payload.status, Status::Ok, "reparse failed: {text}");
    payload.config.into_iter().next().unwrap().parsed
}

fn assert_round_trip(source: &Path, options: &ParseOptions) {
    let registry = Registry::standard();
    let payload = parse_file(source, &registry, options).expect("parse");
    assert_eq!(payload.status, Status::Ok);
    let original = &payload.config[0].parsed;

    let built = build(original, &registry, &BuildOptions::default());
    let reparsed = reparse(&built, &registry, options);
    assert_trees_match(original, &reparsed);

    // building the reparsed tree again must be byte-identical
    let rebuilt = build(&reparsed, &registry, &BuildOptions::default());
    assert_eq!(built, rebuilt);
}

#[test]
fn simple_config_round_trips() {
    assert_round_trip(&fixture("simple/nginx.conf"), &ParseOptions::default());
}

#[test]
fn messy_config_round_trips() {
    assert_round_trip(&fixture("messy/nginx.conf"), &ParseOptions::default());
}

#[test]
fn comments_round_trip() {
    let options = ParseOptions {
        comments: true,
        ..Default::default()
    };
    assert_round_trip(&fixture("comments/nginx.conf"), &options);
}

#[test]
fn lua_blocks_round_trip() {
    assert_round_trip(&fixture("lua/nginx.conf"), &ParseOptions::default());
}

#[test]
fn enquoted_arguments_survive_reparsing() {
    let registry = Registry::new();
    let options = ParseOptions {
        check_ctx: false,
        check_args: false,
        ..Default::default()
    };

    for arg in [
        "plain",
        "has space",
        "semi;colon",
        "open{brace",
        "close}brace",
        "quo\"ted",
        "it's",
        "${host}",
        "pre${host}post",
        "",
        "a=b,c:d",
        "$variable",
    ] {
        let tree = vec![Directive::new("set", 1).with_args(["$check", arg])];
        let built = build(&tree, &registry, &BuildOptions::default());
        let reparsed = reparse(&built, &registry, &options);
        assert_eq!(
            reparsed[0].args[1], arg,
            "argument {arg:?} did not survive build + reparse (built as {built:?})"
        );
    }
}

#[test]
fn directive_with_breaking_name_round_trips() {
    let registry = Registry::new();
    let options = ParseOptions {
        check_ctx: false,
        check_args: false,
        ..Default::default()
    };
    let tree = vec![Directive::new("strange name", 1).with_args(["x"])];
    let built = build(&tree, &registry, &BuildOptions::default());
    assert_eq!(built, "'strange name' x;");
    let reparsed = reparse(&built, &registry, &options);
    assert_eq!(reparsed[0].directive, "strange name");
}
