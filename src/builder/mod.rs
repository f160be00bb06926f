//! Directive-tree to configuration-text rendering.
//!
//! The inverse of the parser: a tree renders back to canonical text with one
//! statement per line, `padding × depth` margins, comments re-attached to the
//! line they came from, and extension build hooks taking over hooked
//! directives wholesale.

mod quote;

pub use quote::enquote;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ParseError, Result};
use crate::ext::Registry;
use crate::types::{Directive, Payload};

/// Rendering knobs.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Spaces per indent level (ignored with `tabs`).
    pub indent: usize,
    /// Indent with tab characters instead of spaces.
    pub tabs: bool,
    /// Prefix built files with a generated-file banner.
    pub header: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            tabs: false,
            header: false,
        }
    }
}

/// Render a directive tree to configuration text.
pub fn build(block: &[Directive], registry: &Registry, options: &BuildOptions) -> String {
    let padding = if options.tabs {
        "\t".to_string()
    } else {
        " ".repeat(options.indent)
    };

    let mut output = String::new();
    if options.header {
        output.push_str("# This config was rebuilt from its JSON representation.\n\n");
    }
    let body = build_block(String::new(), block, 0, 0, &padding, registry, options);
    output.push_str(&body);
    output
}

fn build_block(
    mut output: String,
    block: &[Directive],
    depth: usize,
    last_line: usize,
    padding: &str,
    registry: &Registry,
    options: &BuildOptions,
) -> String {
    let margin = padding.repeat(depth);
    let mut last_line = last_line;

    for stmt in block {
        let line = stmt.line;

        if stmt.is_comment() && line == last_line {
            // same source line as the previous statement: keep it there
            output.push_str(" #");
            output.push_str(stmt.comment.as_deref().unwrap_or(""));
            continue;
        }

        let built = if stmt.is_comment() {
            format!("#{}", stmt.comment.as_deref().unwrap_or(""))
        } else if let Some(hooked) =
            registry.run_build_hook(stmt, padding, options.indent, options.tabs)
        {
            hooked
        } else {
            let args: Vec<String> = stmt.args.iter().map(|arg| enquote(arg)).collect();
            let mut built = if stmt.directive == "if" {
                format!("if ({})", args.join(" "))
            } else if args.is_empty() {
                enquote(&stmt.directive)
            } else {
                format!("{} {}", enquote(&stmt.directive), args.join(" "))
            };
            if let Some(inner) = &stmt.block {
                built.push_str(" {");
                built = build_block(built, inner, depth + 1, line, padding, registry, options);
                built.push('\n');
                built.push_str(&margin);
                built.push('}');
            } else {
                built.push(';');
            }
            built
        };

        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&margin);
        output.push_str(&built);
        last_line = line;
    }

    output
}

/// Write every file in `payload` under `dirname` (current directory when
/// `None`; absolute file paths are kept as-is). Parent directories are
/// created, and each file ends with exactly one newline.
pub fn build_files(
    payload: &Payload,
    dirname: Option<&Path>,
    registry: &Registry,
    options: &BuildOptions,
) -> Result<()> {
    let base: PathBuf = match dirname {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|e| ParseError::io(Path::new("."), &e))?,
    };

    for config in &payload.config {
        let path = if config.file.is_absolute() {
            config.file.clone()
        } else {
            base.join(&config.file)
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ParseError::io(parent, &e))?;
        }

        let mut text = build(&config.parsed, registry, options);
        while text.ends_with('\n') {
            text.pop();
        }
        text.push('\n');
        fs::write(&path, text).map_err(|e| ParseError::io(&path, &e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Directive;

    fn build_default(block: &[Directive]) -> String {
        build(block, &Registry::new(), &BuildOptions::default())
    }

    #[test]
    fn simple_block() {
        let tree = vec![Directive::new("events", 1).with_block(vec![
            Directive::new("worker_connections", 2).with_args(["1024"]),
        ])];
        assert_eq!(
            build_default(&tree),
            "events {\n    worker_connections 1024;\n}"
        );
    }

    #[test]
    fn tabs_and_custom_indent() {
        let tree = vec![Directive::new("events", 1).with_block(vec![
            Directive::new("worker_connections", 2).with_args(["1024"]),
        ])];
        let tabbed = build(
            &tree,
            &Registry::new(),
            &BuildOptions {
                tabs: true,
                ..Default::default()
            },
        );
        assert_eq!(tabbed, "events {\n\tworker_connections 1024;\n}");

        let two = build(
            &tree,
            &Registry::new(),
            &BuildOptions {
                indent: 2,
                ..Default::default()
            },
        );
        assert_eq!(two, "events {\n  worker_connections 1024;\n}");
    }

    #[test]
    fn if_renders_with_parens() {
        let tree = vec![Directive::new("if", 1)
            .with_args(["$request_method", "=", "POST"])
            .with_block(vec![Directive::new("return", 2).with_args(["405"])])];
        assert_eq!(
            build_default(&tree),
            "if ($request_method = POST) {\n    return 405;\n}"
        );
    }

    #[test]
    fn comment_on_its_own_line() {
        let tree = vec![
            Directive::comment(" banner", 1),
            Directive::new("user", 2).with_args(["nobody"]),
        ];
        assert_eq!(build_default(&tree), "# banner\nuser nobody;");
    }

    #[test]
    fn comment_reattaches_to_same_line() {
        let tree = vec![
            Directive::new("listen", 1).with_args(["80"]),
            Directive::comment(" default port", 1),
        ];
        assert_eq!(build_default(&tree), "listen 80; # default port");
    }

    #[test]
    fn arguments_are_enquoted() {
        let tree = vec![Directive::new("log_format", 1).with_args(["main", "a \"b\""])];
        assert_eq!(build_default(&tree), "log_format main 'a \"b\"';");
    }

    #[test]
    fn extension_hook_output_used_verbatim() {
        let registry = Registry::standard();
        let tree = vec![Directive::new("content_by_lua_block", 1)
            .with_args([" ngx.say(1) "])];
        assert_eq!(
            build(&tree, &registry, &BuildOptions::default()),
            "content_by_lua_block { ngx.say(1) }"
        );
    }

    #[test]
    fn empty_block_renders_open_close() {
        let tree = vec![Directive::new("events", 1).with_block(Vec::new())];
        assert_eq!(build_default(&tree), "events {\n}");
    }

    #[test]
    fn header_banner_prepended() {
        let tree = vec![Directive::new("user", 1).with_args(["nobody"])];
        let text = build(
            &tree,
            &Registry::new(),
            &BuildOptions {
                header: true,
                ..Default::default()
            },
        );
        assert!(text.starts_with("# This config was rebuilt"));
        assert!(text.ends_with("user nobody;"));
    }
}
