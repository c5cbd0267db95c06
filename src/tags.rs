//! Struct-tag surface the translator consumes: `luaname:"…"` and
//! `luadefault:"…"`. The grammar follows Go's own `reflect.StructTag`
//! convention (space-separated `key:"value"` pairs), since that's the tag
//! syntax the source language's struct fields actually carry.

use std::collections::HashMap;

pub fn parse(tag: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let mut rest = tag;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let Some(colon) = rest.find(':') else { break };
        let key = &rest[..colon];
        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') || key.is_empty() {
            break;
        }
        let after_colon = &rest[colon + 1..];
        if !after_colon.starts_with('"') {
            break;
        }
        let value_start = &after_colon[1..];
        let Some(end) = value_start.find('"') else { break };
        out.insert(key.to_string(), value_start[..end].to_string());
        rest = &value_start[end + 1..];
    }
    out
}

pub fn lua_name(tag: &str, default: &str) -> String {
    parse(tag)
        .get("luaname")
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

pub fn lua_default(tag: &str) -> Option<String> {
    parse(tag).get("luadefault").cloned()
}
