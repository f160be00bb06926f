mod common;

use common::{fixture, parse_fixture, walk};
use ngx_config::{parse_file, ErrorKind, ParseError, ParseOptions, Registry, Status};
use serde_json::json;

#[test]
fn single_line_config_payload_shape() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nginx.conf");
    std::fs::write(&path, "events { worker_connections 1024; }\n").expect("write");

    let payload = parse_file(&path, &Registry::new(), &ParseOptions::default()).expect("parse");
    let value = serde_json::to_value(&payload).expect("serialize");
    assert_eq!(
        value,
        json!({
            "status": "ok",
            "errors": [],
            "config": [{
                "file": path.to_str().unwrap(),
                "status": "ok",
                "errors": [],
                "parsed": [{
                    "directive": "events",
                    "line": 1,
                    "args": [],
                    "block": [{
                        "directive": "worker_connections",
                        "line": 1,
                        "args": ["1024"],
                    }],
                }],
            }],
        })
    );
}

#[test]
fn nested_blocks_and_lines() {
    let payload = parse_fixture("simple/nginx.conf", &ParseOptions::default());
    assert_eq!(payload.status, Status::Ok);
    let parsed = &payload.config[0].parsed;
    assert_eq!(parsed.len(), 2);

    let http = &parsed[1];
    assert_eq!(http.directive, "http");
    assert_eq!(http.line, 5);
    let server = &http.block.as_ref().unwrap()[0];
    assert_eq!(server.directive, "server");
    let location = &server.block.as_ref().unwrap()[2];
    assert_eq!(location.directive, "location");
    assert_eq!(location.args, vec!["/"]);
    let ret = &location.block.as_ref().unwrap()[0];
    assert_eq!(ret.args, vec!["200", "foo bar baz"]);
}

#[test]
fn no_brace_tokens_survive_into_the_tree() {
    let payload = parse_fixture("simple/nginx.conf", &ParseOptions::default());
    walk(&payload.config[0].parsed, &mut |stmt| {
        assert!(stmt.directive != "{" && stmt.directive != "}");
        assert!(stmt.args.iter().all(|arg| arg != "{"));
    });
}

#[test]
fn globbed_includes_are_indexed_breadth_first() {
    let payload = parse_fixture("includes/nginx.conf", &ParseOptions::default());
    assert_eq!(payload.status, Status::Ok);
    assert_eq!(payload.config.len(), 4);

    let files: Vec<String> = payload
        .config
        .iter()
        .map(|c| c.file.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        files,
        vec!["nginx.conf", "http.conf", "server1.conf", "server2.conf"]
    );

    let include = &payload.config[0].parsed[1];
    assert_eq!(include.directive, "include");
    assert_eq!(include.includes, Some(vec![1]));

    let http = &payload.config[1].parsed[0];
    let inner = &http.block.as_ref().unwrap()[0];
    assert_eq!(inner.includes, Some(vec![2, 3]));
}

#[test]
fn file_parsed_once_even_when_included_twice() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("nginx.conf"),
        "include shared.conf;\ninclude shared.conf;\n",
    )
    .expect("write");
    std::fs::write(dir.path().join("shared.conf"), "user nobody;\n").expect("write");

    let payload = parse_file(
        dir.path().join("nginx.conf"),
        &Registry::new(),
        &ParseOptions::default(),
    )
    .expect("parse");
    assert_eq!(payload.config.len(), 2);
    assert_eq!(payload.config[0].parsed[0].includes, Some(vec![1]));
    assert_eq!(payload.config[0].parsed[1].includes, Some(vec![1]));
}

#[test]
fn combine_inlines_every_include() {
    let options = ParseOptions {
        combine: true,
        ..Default::default()
    };
    let payload = parse_fixture("includes/nginx.conf", &options);
    assert_eq!(payload.config.len(), 1);
    assert_eq!(payload.config[0].file, fixture("includes/nginx.conf"));

    let parsed = &payload.config[0].parsed;
    walk(parsed, &mut |stmt| assert_ne!(stmt.directive, "include"));

    assert_eq!(parsed[0].directive, "events");
    let http = &parsed[1];
    assert_eq!(http.directive, "http");
    assert_eq!(http.file.as_deref(), Some(fixture("includes/http.conf").as_path()));

    let servers = http.block.as_ref().unwrap();
    assert_eq!(servers.len(), 2);
    let names: Vec<&str> = servers
        .iter()
        .map(|s| s.block.as_ref().unwrap()[1].args[0].as_str())
        .collect();
    assert_eq!(names, vec!["example1.com", "example2.com"]);
    assert_eq!(
        servers[0].file.as_deref(),
        Some(fixture("includes/servers/server1.conf").as_path())
    );
}

#[test]
fn circular_includes_parse_without_combine() {
    let payload = parse_fixture("cycle/a.conf", &ParseOptions::default());
    assert_eq!(payload.status, Status::Ok);
    assert_eq!(payload.config.len(), 2);
    // each file is parsed once; the back-reference reuses index 0
    assert_eq!(payload.config[0].parsed[1].includes, Some(vec![1]));
    assert_eq!(payload.config[1].parsed[0].includes, Some(vec![0]));
}

#[test]
fn circular_includes_surface_as_combine_errors() {
    let options = ParseOptions {
        combine: true,
        ..Default::default()
    };
    let payload = parse_fixture("cycle/a.conf", &options);
    assert_eq!(payload.status, Status::Failed);
    assert_eq!(payload.config.len(), 1);
    assert_eq!(payload.config[0].status, Status::Failed);

    // the cycle is broken, everything reachable once is kept
    let parsed = &payload.config[0].parsed;
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].directive, "user");

    let a_conf = fixture("cycle/a.conf");
    let b_conf = fixture("cycle/b.conf");
    assert_eq!(payload.errors.len(), 1);
    let err = &payload.errors[0];
    assert_eq!(err.file, b_conf);
    assert_eq!(err.line, Some(1));
    assert_eq!(
        err.error,
        format!(
            "circular include: \"{}\" in {}:1",
            a_conf.display(),
            b_conf.display()
        )
    );
    assert_eq!(
        payload.config[0].errors.last().unwrap().error,
        err.error
    );
}

#[test]
fn single_file_mode_leaves_includes_alone() {
    let options = ParseOptions {
        single_file: true,
        ..Default::default()
    };
    let payload = parse_fixture("includes/nginx.conf", &options);
    assert_eq!(payload.config.len(), 1);
    let include = &payload.config[0].parsed[1];
    assert_eq!(include.directive, "include");
    assert_eq!(include.includes, None);
}

#[test]
fn missing_include_is_recorded_with_provenance() {
    let payload = parse_fixture("missing-include/nginx.conf", &ParseOptions::default());
    assert_eq!(payload.status, Status::Failed);
    assert_eq!(payload.errors.len(), 1);

    let server_conf = fixture("missing-include/conf.d/server.conf");
    let bar_conf = fixture("missing-include/bar.conf");
    let err = &payload.errors[0];
    assert_eq!(err.file, server_conf);
    assert_eq!(err.line, Some(3));
    assert_eq!(
        err.error,
        format!(
            "No such file or directory: \"{}\" in {}:3",
            bar_conf.display(),
            server_conf.display()
        )
    );
    assert!(err.callback.is_none());

    // the include statement survives with an empty target list
    let server_report = &payload.config[1];
    assert_eq!(server_report.status, Status::Failed);
    let server = &server_report.parsed[0];
    let include = &server.block.as_ref().unwrap()[1];
    assert_eq!(include.directive, "include");
    assert_eq!(include.includes, Some(vec![]));

    // the main file itself parsed cleanly
    assert_eq!(payload.config[0].status, Status::Ok);
}

#[test]
fn strict_mode_flags_unknown_directive_but_keeps_structure() {
    let options = ParseOptions {
        strict: true,
        comments: true,
        ..Default::default()
    };
    let payload = parse_fixture("strict/nginx.conf", &options);
    assert_eq!(payload.status, Status::Failed);
    assert_eq!(payload.errors.len(), 1);
    assert!(payload.errors[0]
        .error
        .starts_with("unknown directive \"proxy_passs\""));
    assert_eq!(payload.errors[0].line, Some(4));

    let http = &payload.config[0].parsed[0];
    let server = &http.block.as_ref().unwrap()[0];
    let location = &server.block.as_ref().unwrap()[0];
    assert_eq!(location.directive, "location");
    // the offending statement is dropped, the block around it kept
    assert!(location.block.as_ref().unwrap().is_empty());
}

#[test]
fn comments_kept_only_on_request() {
    let without = parse_fixture("comments/nginx.conf", &ParseOptions::default());
    assert_eq!(without.config[0].parsed.len(), 1);
    assert_eq!(without.config[0].parsed[0].directive, "events");

    let options = ParseOptions {
        comments: true,
        ..Default::default()
    };
    let with = parse_fixture("comments/nginx.conf", &options);
    let parsed = &with.config[0].parsed;
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].directive, "#");
    assert_eq!(parsed[0].comment.as_deref(), Some(" banner comment"));

    let events = &parsed[1];
    let inner = events.block.as_ref().unwrap();
    assert_eq!(inner.len(), 2);
    assert_eq!(inner[0].directive, "worker_connections");
    assert_eq!(inner[1].directive, "#");
    assert_eq!(inner[1].comment.as_deref(), Some(" tuned for tests"));
    assert_eq!(inner[1].line, inner[0].line);
}

#[test]
fn ignored_directives_are_dropped_with_their_blocks() {
    let options = ParseOptions {
        ignore: vec!["events".to_string()],
        ..Default::default()
    };
    let payload = parse_fixture("simple/nginx.conf", &options);
    let parsed = &payload.config[0].parsed;
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].directive, "http");
}

#[test]
fn on_error_callback_lands_on_payload_errors_only() {
    let options = ParseOptions {
        strict: true,
        on_error: Some(|err: &ParseError| serde_json::Value::String(err.to_string())),
        ..Default::default()
    };
    let payload = parse_fixture("strict/nginx.conf", &options);
    let err = &payload.errors[0];
    assert_eq!(
        err.callback,
        Some(serde_json::Value::String(err.error.clone()))
    );
    // file-level records never carry the callback
    let file_err = serde_json::to_value(&payload.config[0].errors[0]).unwrap();
    assert!(file_err.get("callback").is_none());
}

#[test]
fn no_catch_raises_the_first_error() {
    let options = ParseOptions {
        strict: true,
        catch_errors: false,
        ..Default::default()
    };
    let err = parse_file(
        fixture("strict/nginx.conf"),
        &Registry::standard(),
        &options,
    )
    .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnknownDirective("proxy_passs".to_string())
    );
}

#[test]
fn missing_main_file_is_a_failed_payload() {
    let payload = parse_fixture("does-not-exist.conf", &ParseOptions::default());
    assert_eq!(payload.status, Status::Failed);
    assert_eq!(payload.config.len(), 1);
    assert_eq!(payload.config[0].status, Status::Failed);
    assert!(payload.errors[0]
        .error
        .starts_with("No such file or directory"));
}

#[test]
fn brace_imbalance_fails_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nginx.conf");
    std::fs::write(&path, "events {\n    worker_connections 1024;\n").expect("write");

    let payload = parse_file(&path, &Registry::new(), &ParseOptions::default()).expect("parse");
    assert_eq!(payload.status, Status::Failed);
    assert!(payload.errors[0]
        .error
        .contains("unexpected end of file, expecting \"}\""));
    assert!(payload.config[0].parsed.is_empty());
}

#[test]
fn stray_close_brace_is_a_syntax_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nginx.conf");
    std::fs::write(&path, "user nobody;\n}\n").expect("write");

    let payload = parse_file(&path, &Registry::new(), &ParseOptions::default()).expect("parse");
    assert_eq!(payload.status, Status::Failed);
    assert!(payload.errors[0].error.contains("unexpected \"}\""));
    assert_eq!(payload.errors[0].line, Some(2));
}

#[test]
fn wrong_arity_is_recovered_from() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nginx.conf");
    std::fs::write(
        &path,
        "events {\n    worker_connections 1024 2048;\n}\nuser nobody;\n",
    )
    .expect("write");

    let payload = parse_file(&path, &Registry::new(), &ParseOptions::default()).expect("parse");
    assert_eq!(payload.status, Status::Failed);
    assert!(payload.errors[0]
        .error
        .starts_with("invalid number of arguments in \"worker_connections\""));
    // parsing continued past the bad statement
    let parsed = &payload.config[0].parsed;
    assert_eq!(parsed.last().unwrap().directive, "user");
}

#[test]
fn if_arguments_lose_their_parens() {
    let payload = parse_fixture("messy/nginx.conf", &ParseOptions::default());
    let http = &payload.config[0].parsed[2];
    let server = &http.block.as_ref().unwrap()[0];
    let if_stmt = &server.block.as_ref().unwrap()[3];
    assert_eq!(if_stmt.directive, "if");
    assert_eq!(if_stmt.args, vec!["$request_method", "=", "POST"]);
    assert!(if_stmt.block.is_some());
}

#[test]
fn lua_block_parses_into_arguments() {
    let payload = parse_fixture("lua/nginx.conf", &ParseOptions::default());
    assert_eq!(payload.status, Status::Ok);
    let http = &payload.config[0].parsed[0];
    let server = &http.block.as_ref().unwrap()[0];
    let location = &server.block.as_ref().unwrap()[0];
    let lua = &location.block.as_ref().unwrap()[0];
    assert_eq!(lua.directive, "set_by_lua_block");
    assert_eq!(lua.args, vec!["$res", " return { 1,2,3 } "]);
    assert!(lua.block.is_none());
}
