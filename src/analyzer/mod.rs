//! Directive analysis: bitmask-encoded context and arity validation.
//!
//! Every catalog entry is a list of masks, one per valid usage form of the
//! directive. The low bits of a mask encode the argument arity class, the
//! high bits the block contexts the form may appear in. A directive passes
//! analysis when at least one of its masks accepts the statement.

pub mod catalog;

use std::path::Path;

use crate::error::{ErrorKind, ParseError, Result};
use crate::ext::Registry;
use crate::types::Directive;

// arity classes (one-hot low bits; bit n set means "exactly n arguments")
pub const NGX_CONF_NOARGS: u64 = 0x0000_0001;
pub const NGX_CONF_TAKE1: u64 = 0x0000_0002;
pub const NGX_CONF_TAKE2: u64 = 0x0000_0004;
pub const NGX_CONF_TAKE3: u64 = 0x0000_0008;
pub const NGX_CONF_TAKE4: u64 = 0x0000_0010;
pub const NGX_CONF_TAKE5: u64 = 0x0000_0020;
pub const NGX_CONF_TAKE6: u64 = 0x0000_0040;
pub const NGX_CONF_TAKE7: u64 = 0x0000_0080;
pub const NGX_CONF_BLOCK: u64 = 0x0000_0100;
pub const NGX_CONF_FLAG: u64 = 0x0000_0200;
pub const NGX_CONF_ANY: u64 = 0x0000_0400;
pub const NGX_CONF_1MORE: u64 = 0x0000_0800;
pub const NGX_CONF_2MORE: u64 = 0x0000_1000;

// convenience unions
pub const NGX_CONF_TAKE12: u64 = NGX_CONF_TAKE1 | NGX_CONF_TAKE2;
pub const NGX_CONF_TAKE13: u64 = NGX_CONF_TAKE1 | NGX_CONF_TAKE3;
pub const NGX_CONF_TAKE23: u64 = NGX_CONF_TAKE2 | NGX_CONF_TAKE3;
pub const NGX_CONF_TAKE34: u64 = NGX_CONF_TAKE3 | NGX_CONF_TAKE4;
pub const NGX_CONF_TAKE123: u64 = NGX_CONF_TAKE12 | NGX_CONF_TAKE3;
pub const NGX_CONF_TAKE1234: u64 = NGX_CONF_TAKE123 | NGX_CONF_TAKE4;

// contexts (high bits); DIRECT_CONF marks main-file-only directives
pub const NGX_DIRECT_CONF: u64 = 0x0001_0000;
pub const NGX_MAIN_CONF: u64 = 0x0004_0000;
pub const NGX_EVENT_CONF: u64 = 0x0008_0000;
pub const NGX_MAIL_MAIN_CONF: u64 = 0x0010_0000;
pub const NGX_MAIL_SRV_CONF: u64 = 0x0020_0000;
pub const NGX_STREAM_MAIN_CONF: u64 = 0x0040_0000;
pub const NGX_STREAM_SRV_CONF: u64 = 0x0080_0000;
pub const NGX_STREAM_UPS_CONF: u64 = 0x0100_0000;
pub const NGX_HTTP_MAIN_CONF: u64 = 0x0200_0000;
pub const NGX_HTTP_SRV_CONF: u64 = 0x0400_0000;
pub const NGX_HTTP_LOC_CONF: u64 = 0x0800_0000;
pub const NGX_HTTP_UPS_CONF: u64 = 0x1000_0000;
pub const NGX_HTTP_SIF_CONF: u64 = 0x2000_0000;
pub const NGX_HTTP_LIF_CONF: u64 = 0x4000_0000;
pub const NGX_HTTP_LMT_CONF: u64 = 0x8000_0000;

/// Every context bit: the mask for directives valid anywhere (`include`).
pub const NGX_ANY_CONF: u64 = NGX_MAIN_CONF
    | NGX_EVENT_CONF
    | NGX_MAIL_MAIN_CONF
    | NGX_MAIL_SRV_CONF
    | NGX_STREAM_MAIN_CONF
    | NGX_STREAM_SRV_CONF
    | NGX_STREAM_UPS_CONF
    | NGX_HTTP_MAIN_CONF
    | NGX_HTTP_SRV_CONF
    | NGX_HTTP_LOC_CONF
    | NGX_HTTP_UPS_CONF
    | NGX_HTTP_SIF_CONF
    | NGX_HTTP_LIF_CONF
    | NGX_HTTP_LMT_CONF;

/// Map a nested-block path to its context bit. Unknown paths (custom or
/// extension blocks) yield `None`, which turns validation off for their
/// contents.
pub fn context_mask(ctx: &[String]) -> Option<u64> {
    let parts: Vec<&str> = ctx.iter().map(String::as_str).collect();
    match parts.as_slice() {
        [] => Some(NGX_MAIN_CONF),
        ["events"] => Some(NGX_EVENT_CONF),
        ["mail"] => Some(NGX_MAIL_MAIN_CONF),
        ["mail", "server"] => Some(NGX_MAIL_SRV_CONF),
        ["stream"] => Some(NGX_STREAM_MAIN_CONF),
        ["stream", "server"] => Some(NGX_STREAM_SRV_CONF),
        ["stream", "upstream"] => Some(NGX_STREAM_UPS_CONF),
        ["http"] => Some(NGX_HTTP_MAIN_CONF),
        ["http", "server"] => Some(NGX_HTTP_SRV_CONF),
        ["http", "location"] => Some(NGX_HTTP_LOC_CONF),
        ["http", "upstream"] => Some(NGX_HTTP_UPS_CONF),
        ["http", "server", "if"] => Some(NGX_HTTP_SIF_CONF),
        ["http", "location", "if"] => Some(NGX_HTTP_LIF_CONF),
        ["http", "location", "limit_except"] => Some(NGX_HTTP_LMT_CONF),
        _ => None,
    }
}

/// The context a block directive's children live in.
///
/// `location` blocks do not nest context-wise: a location inside a location
/// is still `["http", "location"]`.
pub fn enter_block_ctx(stmt: &Directive, ctx: &[String]) -> Vec<String> {
    if ctx.first().map(String::as_str) == Some("http") && stmt.directive == "location" {
        return vec!["http".to_string(), "location".to_string()];
    }
    let mut next = ctx.to_vec();
    next.push(stmt.directive.clone());
    next
}

/// Validate one statement against the catalog.
///
/// `term` is the token that ended the statement: `";"`, `"{"`, or `"}"`.
/// Masks are tried in reverse order so the error raised on total failure
/// reflects the directive's primary form.
#[allow(clippy::too_many_arguments)]
pub fn analyze(
    fname: &Path,
    stmt: &Directive,
    term: &str,
    ctx: &[String],
    registry: &Registry,
    strict: bool,
    check_ctx: bool,
    check_args: bool,
) -> Result<()> {
    let directive = stmt.directive.as_str();
    let masks = registry
        .directive_masks(directive)
        .or_else(|| catalog::masks(directive));

    if strict && masks.is_none() {
        return Err(located(
            ErrorKind::UnknownDirective(directive.to_string()),
            fname,
            stmt.line,
        ));
    }

    // nothing to validate without both a known directive and a known context
    let (Some(masks), Some(ctx_mask)) = (masks, context_mask(ctx)) else {
        return Ok(());
    };

    let masks: Vec<u64> = if check_ctx {
        let allowed: Vec<u64> = masks
            .iter()
            .copied()
            .filter(|mask| mask & ctx_mask == ctx_mask)
            .collect();
        if allowed.is_empty() {
            return Err(located(
                ErrorKind::ContextNotAllowed(directive.to_string()),
                fname,
                stmt.line,
            ));
        }
        allowed
    } else {
        masks.to_vec()
    };

    if !check_args {
        return Ok(());
    }

    let n_args = stmt.args.len();
    let valid_flag = n_args == 1
        && matches!(stmt.args[0].to_ascii_lowercase().as_str(), "on" | "off");

    let mut candidate = None;
    for mask in masks.iter().rev() {
        if mask & NGX_CONF_BLOCK != 0 && term != "{" {
            candidate = Some(ErrorKind::MissingOpeningBrace(directive.to_string()));
            continue;
        }
        if mask & NGX_CONF_BLOCK == 0 && term != ";" {
            candidate = Some(ErrorKind::MissingTerminator(directive.to_string()));
            continue;
        }

        let accepted = (n_args <= 7 && mask >> n_args & 1 != 0)
            || (mask & NGX_CONF_FLAG != 0 && valid_flag)
            || mask & NGX_CONF_ANY != 0
            || (mask & NGX_CONF_1MORE != 0 && n_args >= 1)
            || (mask & NGX_CONF_2MORE != 0 && n_args >= 2);
        if accepted {
            return Ok(());
        }

        if mask & NGX_CONF_FLAG != 0 && n_args == 1 {
            candidate = Some(ErrorKind::InvalidFlagValue {
                directive: directive.to_string(),
                value: stmt.args[0].clone(),
            });
        } else {
            candidate = Some(ErrorKind::InvalidArguments(directive.to_string()));
        }
    }

    match candidate {
        Some(kind) => Err(located(kind, fname, stmt.line)),
        // the mask list is never empty, but don't fail silently if it is
        None => Ok(()),
    }
}

fn located(kind: ErrorKind, fname: &Path, line: usize) -> ParseError {
    ParseError::new(kind, fname, Some(line))
}
