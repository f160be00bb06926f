//! Extension registry: pluggable lexing and building for directives whose
//! bodies are not nginx syntax.
//!
//! Hooks are registered before the first parse and looked up by directive
//! name. An [`Extension`] bundles the three aspects a plugin usually needs
//! (catalog entries, a lexer, a builder); the `register_*` primitives accept
//! bare closures for one-off hooks.

mod lua;

pub use lua::LuaBlocks;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::lexer::CharStream;
use crate::types::{Directive, Token};

type LexHookFn = dyn Fn(&mut CharStream, &str) -> Result<Vec<Token>> + Send + Sync;
type BuildHookFn = dyn Fn(&Directive, &str, usize, bool) -> String + Send + Sync;

/// A directive plugin: extra catalog entries plus symmetric lex/build hooks.
pub trait Extension: Send + Sync {
    /// Directive names taken over by this extension, with their analyzer
    /// bitmasks.
    fn directives(&self) -> &[(&'static str, &'static [u64])];

    /// Consume the directive's body from the live character stream and
    /// produce its tokens, ending with a `;` token.
    fn lex(&self, stream: &mut CharStream, directive: &str) -> Result<Vec<Token>>;

    /// Render the directive back to text. The builder prepends the margin to
    /// the first line only.
    fn build(&self, stmt: &Directive, padding: &str, indent: usize, tabs: bool) -> String;
}

/// Registered hooks and catalog additions, immutable once parsing begins.
#[derive(Default)]
pub struct Registry {
    lex_hooks: HashMap<String, Arc<LexHookFn>>,
    build_hooks: HashMap<String, Arc<BuildHookFn>>,
    directives: HashMap<String, Vec<u64>>,
}

impl Registry {
    /// An empty registry: plain nginx syntax only.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock registry with the [`LuaBlocks`] extension installed.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(LuaBlocks);
        registry
    }

    /// Install a full extension: its catalog entries and both hooks.
    pub fn register<E: Extension + 'static>(&mut self, ext: E) {
        let ext = Arc::new(ext);
        let names: Vec<&'static str> = ext.directives().iter().map(|(name, _)| *name).collect();
        for (name, masks) in ext.directives() {
            self.directives.insert((*name).to_string(), masks.to_vec());
        }

        let lex_ext = Arc::clone(&ext);
        let lex: Arc<LexHookFn> =
            Arc::new(move |stream, directive| lex_ext.lex(stream, directive));
        let build_ext = Arc::clone(&ext);
        let build: Arc<BuildHookFn> = Arc::new(move |stmt, padding, indent, tabs| {
            build_ext.build(stmt, padding, indent, tabs)
        });
        for name in names {
            self.lex_hooks.insert(name.to_string(), Arc::clone(&lex));
            self.build_hooks.insert(name.to_string(), Arc::clone(&build));
        }
    }

    /// Register a bare lexing hook for the given directive names.
    pub fn register_lex_hook<F>(&mut self, names: &[&str], hook: F)
    where
        F: Fn(&mut CharStream, &str) -> Result<Vec<Token>> + Send + Sync + 'static,
    {
        let hook: Arc<LexHookFn> = Arc::new(hook);
        for name in names {
            self.lex_hooks.insert((*name).to_string(), Arc::clone(&hook));
        }
    }

    /// Register a bare building hook for the given directive names.
    pub fn register_build_hook<F>(&mut self, names: &[&str], hook: F)
    where
        F: Fn(&Directive, &str, usize, bool) -> String + Send + Sync + 'static,
    {
        let hook: Arc<BuildHookFn> = Arc::new(hook);
        for name in names {
            self.build_hooks.insert((*name).to_string(), Arc::clone(&hook));
        }
    }

    /// Add catalog entries so the analyzer accepts extension directives.
    pub fn register_directives(&mut self, entries: &[(&str, &[u64])]) {
        for (name, masks) in entries {
            self.directives.insert((*name).to_string(), masks.to_vec());
        }
    }

    pub fn has_lex_hook(&self, directive: &str) -> bool {
        self.lex_hooks.contains_key(directive)
    }

    pub(crate) fn run_lex_hook(
        &self,
        stream: &mut CharStream,
        directive: &str,
    ) -> Result<Vec<Token>> {
        match self.lex_hooks.get(directive) {
            Some(hook) => (hook.as_ref())(stream, directive),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn run_build_hook(
        &self,
        stmt: &Directive,
        padding: &str,
        indent: usize,
        tabs: bool,
    ) -> Option<String> {
        self.build_hooks
            .get(&stmt.directive)
            .map(|hook| (hook.as_ref())(stmt, padding, indent, tabs))
    }

    pub(crate) fn directive_masks(&self, directive: &str) -> Option<&[u64]> {
        self.directives.get(directive).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;

    #[test]
    fn closure_hooks_are_shared_across_names() {
        let mut registry = Registry::new();
        registry.register_lex_hook(&["foo_block", "bar_block"], |stream, _| {
            // swallow one chunk so the hook visibly consumed input
            let _ = stream.next_chunk()?;
            Ok(vec![Token::new(";", stream.line(), false)])
        });
        assert!(registry.has_lex_hook("foo_block"));
        assert!(registry.has_lex_hook("bar_block"));
        assert!(!registry.has_lex_hook("baz_block"));
    }

    #[test]
    fn standard_registry_knows_lua_directives() {
        let registry = Registry::standard();
        assert!(registry.has_lex_hook("content_by_lua_block"));
        assert!(registry.directive_masks("set_by_lua_block").is_some());
    }

    #[test]
    fn registered_directives_override_nothing_until_asked() {
        let registry = Registry::new();
        assert!(registry.directive_masks("content_by_lua_block").is_none());
    }
}
