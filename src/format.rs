//! Formatting and minifying: fixed-option compositions of parser + builder.

use std::path::Path;

use crate::builder::{build, enquote, BuildOptions};
use crate::error::{ErrorKind, ParseError, Result};
use crate::ext::Registry;
use crate::parser::{parse_file, ParseOptions};
use crate::types::{Directive, Payload};

/// Re-render a single file with canonical indentation, comments preserved.
///
/// Context and argument validation are off so that formatting works on
/// configs the analyzer would reject; syntax errors still fail.
pub fn format_file(
    path: impl AsRef<Path>,
    registry: &Registry,
    indent: usize,
    tabs: bool,
) -> Result<String> {
    let path = path.as_ref();
    let options = ParseOptions {
        catch_errors: false,
        single_file: true,
        comments: true,
        check_ctx: false,
        check_args: false,
        ..Default::default()
    };
    let payload = parse_file(path, registry, &options)?;
    let parsed = take_single_parsed(path, payload)?;

    let build_options = BuildOptions {
        indent,
        tabs,
        header: false,
    };
    let mut output = build(&parsed, registry, &build_options);
    output.push('\n');
    Ok(output)
}

/// Strip comments and collapse a single file onto one line.
pub fn minify_file(path: impl AsRef<Path>, registry: &Registry) -> Result<String> {
    let path = path.as_ref();
    let options = ParseOptions {
        catch_errors: false,
        single_file: true,
        check_ctx: false,
        check_args: false,
        ..Default::default()
    };
    let payload = parse_file(path, registry, &options)?;
    let parsed = take_single_parsed(path, payload)?;

    let mut output = String::new();
    minify_block(&mut output, &parsed);
    output.push('\n');
    Ok(output)
}

fn minify_block(output: &mut String, block: &[Directive]) {
    for stmt in block {
        if stmt.is_comment() {
            continue;
        }
        output.push_str(&enquote(&stmt.directive));
        if stmt.directive == "if" {
            output.push_str(" (");
            output.push_str(&join_enquoted(&stmt.args));
            output.push(')');
        } else if !stmt.args.is_empty() {
            output.push(' ');
            output.push_str(&join_enquoted(&stmt.args));
        }
        match &stmt.block {
            Some(inner) => {
                output.push_str(" {");
                minify_block(output, inner);
                output.push('}');
            }
            None => output.push(';'),
        }
    }
}

fn join_enquoted(args: &[String]) -> String {
    args.iter()
        .map(|arg| enquote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn take_single_parsed(path: &Path, mut payload: Payload) -> Result<Vec<Directive>> {
    match payload.config.first_mut() {
        Some(config) => Ok(std::mem::take(&mut config.parsed)),
        None => Err(ParseError::new(
            ErrorKind::Io(format!("nothing parsed from \"{}\"", path.display())),
            path,
            None,
        )),
    }
}
