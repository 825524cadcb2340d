//! `{name}` token substitution for URL templates.

/// Replaces `{name}` tokens in `template` in a single pass.
///
/// `lookup` returns the replacement for a token name; tokens it does not
/// know are copied through unchanged, as is an unterminated `{`.
/// Replacement values are never rescanned.
pub fn fill<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find(['}', '{']) else {
            out.push_str(&rest[open..]);
            return out;
        };

        // `{` before `}` means this brace starts no token
        if after_open.as_bytes()[close] == b'{' {
            out.push('{');
            rest = after_open;
            continue;
        }

        let name = &after_open[..close];
        match lookup(name) {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after_open[close + 1..];
    }

    out.push_str(rest);
    out
}
