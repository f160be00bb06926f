//! Embedded-Lua block extension.
//!
//! OpenResty's `*_by_lua_block` directives carry a Lua chunk between braces.
//! The body is not nginx syntax, so the lexer hands the character stream to
//! this extension, which scans to the matching close brace (brace characters
//! inside Lua strings and `--` comments do not count) and emits the body as a
//! single string-like token terminated by `;`. The builder hook is the exact
//! inverse.

use crate::analyzer::{
    NGX_CONF_TAKE1, NGX_CONF_TAKE2, NGX_HTTP_LIF_CONF, NGX_HTTP_LOC_CONF, NGX_HTTP_MAIN_CONF,
    NGX_HTTP_SIF_CONF, NGX_HTTP_SRV_CONF, NGX_HTTP_UPS_CONF,
};
use crate::error::{ErrorKind, Result};
use crate::lexer::CharStream;
use crate::types::{Directive, Token};

use super::Extension;

const HTTP_ALL: u64 = NGX_HTTP_MAIN_CONF | NGX_HTTP_SRV_CONF | NGX_HTTP_LOC_CONF;

const DIRECTIVES: &[(&str, &[u64])] = &[
    ("access_by_lua_block", &[HTTP_ALL | NGX_HTTP_LIF_CONF | NGX_CONF_TAKE1]),
    ("balancer_by_lua_block", &[NGX_HTTP_UPS_CONF | NGX_CONF_TAKE1]),
    ("body_filter_by_lua_block", &[HTTP_ALL | NGX_HTTP_LIF_CONF | NGX_CONF_TAKE1]),
    ("content_by_lua_block", &[NGX_HTTP_LOC_CONF | NGX_HTTP_LIF_CONF | NGX_CONF_TAKE1]),
    ("exit_worker_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_CONF_TAKE1]),
    ("header_filter_by_lua_block", &[HTTP_ALL | NGX_HTTP_LIF_CONF | NGX_CONF_TAKE1]),
    ("init_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_CONF_TAKE1]),
    ("init_worker_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_CONF_TAKE1]),
    ("log_by_lua_block", &[HTTP_ALL | NGX_HTTP_LIF_CONF | NGX_CONF_TAKE1]),
    ("rewrite_by_lua_block", &[HTTP_ALL | NGX_HTTP_LIF_CONF | NGX_CONF_TAKE1]),
    ("server_rewrite_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_HTTP_SRV_CONF | NGX_CONF_TAKE1]),
    (
        "set_by_lua_block",
        &[NGX_HTTP_SRV_CONF
            | NGX_HTTP_SIF_CONF
            | NGX_HTTP_LOC_CONF
            | NGX_HTTP_LIF_CONF
            | NGX_CONF_TAKE2],
    ),
    ("ssl_certificate_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_HTTP_SRV_CONF | NGX_CONF_TAKE1]),
    ("ssl_client_hello_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_HTTP_SRV_CONF | NGX_CONF_TAKE1]),
    ("ssl_session_fetch_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_CONF_TAKE1]),
    ("ssl_session_store_by_lua_block", &[NGX_HTTP_MAIN_CONF | NGX_CONF_TAKE1]),
];

/// Lex and build hooks for `*_by_lua_block` directives.
pub struct LuaBlocks;

impl Extension for LuaBlocks {
    fn directives(&self) -> &[(&'static str, &'static [u64])] {
        DIRECTIVES
    }

    fn lex(&self, stream: &mut CharStream, directive: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        if directive == "set_by_lua_block" {
            // the one hooked directive with an argument before its block
            if let Some(arg) = read_argument(stream)? {
                tokens.push(arg);
            }
        }

        let open = loop {
            match stream.next_chunk()? {
                None => {
                    return Err(stream.error(ErrorKind::UnexpectedEndOfFile("\"{\"".to_string())))
                }
                Some(c) if c.is_whitespace() => continue,
                Some(c) => break c,
            }
        };
        if !open.is('{') {
            return Err(stream
                .error(ErrorKind::Extension(format!(
                    "expected \"{{\" to start Lua block in \"{directive}\" directive"
                )))
                .with_line(open.line));
        }

        let mut depth = 1usize;
        let mut body = String::new();
        let mut line = open.line;
        loop {
            let Some(c) = stream.next_chunk()? else {
                return Err(stream.error(ErrorKind::UnexpectedEndOfFile("\"}\"".to_string())));
            };
            line = c.line;

            // `--` comments run to end of line; braces inside them are text
            if c.is('-') {
                match stream.next_chunk()? {
                    None => {
                        return Err(
                            stream.error(ErrorKind::UnexpectedEndOfFile("\"}\"".to_string()))
                        )
                    }
                    Some(n) if n.is('-') => {
                        body.push_str("--");
                        loop {
                            match stream.next_chunk()? {
                                None => {
                                    return Err(stream.error(ErrorKind::UnexpectedEndOfFile(
                                        "\"}\"".to_string(),
                                    )))
                                }
                                Some(cc) => {
                                    cc.write_to(&mut body);
                                    if cc.ends_with_newline() {
                                        break;
                                    }
                                }
                            }
                        }
                        continue;
                    }
                    Some(n) => {
                        body.push('-');
                        stream.put_back(n);
                        continue;
                    }
                }
            }

            // braces inside Lua string literals are text too
            if c.is('"') || c.is('\'') {
                let quote = c.ch;
                body.push(quote);
                loop {
                    match stream.next_chunk()? {
                        None => {
                            return Err(stream.error(ErrorKind::UnexpectedEndOfFile(format!(
                                "\"{quote}\""
                            ))))
                        }
                        Some(s) => {
                            s.write_to(&mut body);
                            if s.is(quote) {
                                break;
                            }
                        }
                    }
                }
                continue;
            }

            if c.is('{') {
                depth += 1;
            } else if c.is('}') {
                depth -= 1;
                if depth == 0 {
                    tokens.push(Token::new(body, line, true));
                    tokens.push(Token::new(";", line, false));
                    return Ok(tokens);
                }
            }
            c.write_to(&mut body);
        }
    }

    fn build(&self, stmt: &Directive, _padding: &str, _indent: usize, _tabs: bool) -> String {
        if stmt.directive == "set_by_lua_block" {
            let var = stmt.first_arg().unwrap_or("");
            let body = stmt.args.get(1).map(String::as_str).unwrap_or("");
            format!("{} {} {{{}}}", stmt.directive, var, body)
        } else {
            let body = stmt.first_arg().unwrap_or("");
            format!("{} {{{}}}", stmt.directive, body)
        }
    }
}

/// Collect one whitespace-delimited argument, skipping leading whitespace.
fn read_argument(stream: &mut CharStream) -> Result<Option<Token>> {
    let mut arg = String::new();
    let mut line = stream.line();
    loop {
        match stream.next_chunk()? {
            None => break,
            Some(c) if c.is_whitespace() => {
                if arg.is_empty() {
                    continue;
                }
                break;
            }
            Some(c) => {
                c.write_to(&mut arg);
                line = c.line;
            }
        }
    }
    if arg.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Token::new(arg, line, false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ext::Registry;
    use crate::lexer::Lexer;

    fn lex_str(text: &str) -> Vec<Token> {
        let registry = Registry::standard();
        let stream = CharStream::from_string("test.conf", text);
        Lexer::new(stream, &registry)
            .collect::<Result<Vec<_>>>()
            .expect("lexes")
    }

    #[test]
    fn block_with_inner_braces() {
        let tokens = lex_str("set_by_lua_block $res { return { 1,2,3 } }");
        assert_eq!(
            tokens,
            vec![
                Token::new("set_by_lua_block", 1, false),
                Token::new("$res", 1, false),
                Token::new(" return { 1,2,3 } ", 1, true),
                Token::new(";", 1, false),
            ]
        );
    }

    #[test]
    fn braces_inside_strings_do_not_count() {
        let tokens = lex_str("content_by_lua_block { ngx.say(\"}\") }");
        assert_eq!(tokens[1].text, " ngx.say(\"}\") ");
        assert!(tokens[1].quoted);
        assert_eq!(tokens[2].text, ";");
    }

    #[test]
    fn braces_inside_comments_do_not_count() {
        let tokens = lex_str("content_by_lua_block {\n-- closing } here\nngx.exit(200)\n}");
        assert_eq!(tokens[1].text, "\n-- closing } here\nngx.exit(200)\n");
    }

    #[test]
    fn block_glued_to_directive_still_dispatches() {
        let tokens = lex_str("content_by_lua_block{ngx.say(1)}");
        assert_eq!(
            tokens,
            vec![
                Token::new("content_by_lua_block", 1, false),
                Token::new("ngx.say(1)", 1, true),
                Token::new(";", 1, false),
            ]
        );
    }

    #[test]
    fn glued_block_resumes_main_lexer() {
        let tokens = lex_str("init_by_lua_block{x = 1}\nuser nobody;");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["init_by_lua_block", "x = 1", ";", "user", "nobody", ";"]
        );
    }

    #[test]
    fn lexing_resumes_after_the_block() {
        let tokens = lex_str("init_by_lua_block { x = 1 }\nuser nobody;");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["init_by_lua_block", " x = 1 ", ";", "user", "nobody", ";"]
        );
    }

    #[test]
    fn missing_open_brace_is_an_error() {
        let registry = Registry::standard();
        let stream = CharStream::from_string("test.conf", "content_by_lua_block return;");
        let err = Lexer::new(stream, &registry)
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Extension(_)));
    }

    #[test]
    fn unbalanced_block_is_an_error() {
        let registry = Registry::standard();
        let stream = CharStream::from_string("test.conf", "content_by_lua_block { if x {");
        let err = Lexer::new(stream, &registry)
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedEndOfFile(_)));
    }

    #[test]
    fn build_is_the_inverse_of_lex() {
        let stmt = Directive::new("set_by_lua_block", 1).with_args(["$res", " return { 1,2,3 } "]);
        let built = LuaBlocks.build(&stmt, "    ", 4, false);
        assert_eq!(built, "set_by_lua_block $res { return { 1,2,3 } }");
    }
}
