//! Placeholder substitution for `%name%` templates

use std::collections::BTreeMap;

use super::error::ResolveError;

/// Expand `%name%` placeholders in `template` against `scope`
///
/// One left-to-right pass; substituted text is never rescanned, so values
/// containing `%` pass through verbatim. A `%` that does not open a
/// well-formed token (as in `50%` or `a % b`) is emitted literally. A
/// well-formed token whose name is missing from scope is an error naming the
/// token.
pub fn substitute(
    template: &str,
    scope: &BTreeMap<String, String>,
) -> Result<String, ResolveError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match token_len(after) {
            Some(len) => {
                let token = &after[..len];
                match scope.get(token) {
                    Some(value) => out.push_str(value),
                    None => return Err(ResolveError::unresolved(token)),
                }
                // Skip the token and its closing %
                rest = &after[len + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Length of a token name at the start of `s`, provided the name is
/// well-formed (letter or `_`, then letters, digits, `_`, `.`) and closed
/// by `%`
fn token_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return None,
    }
    for (idx, c) in chars {
        if c == '%' {
            return Some(idx);
        }
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '.') {
            return None;
        }
    }
    None
}
