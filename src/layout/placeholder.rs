/// Placeholder spellings, `@`-prefixed ones first so they are never left as `@@handle`.
const HANDLE_PLACEHOLDERS: &[&str] = &[
    "@{brandhandle}",
    "@[brandhandle]",
    "{brandhandle}",
    "[brandhandle]",
];

/// Normalize a handle to exactly one leading `@`. Blank handles stay blank.
pub fn normalize_handle(handle: &str) -> String {
    let bare = handle.trim().trim_start_matches('@');
    if bare.is_empty() {
        String::new()
    } else {
        format!("@{bare}")
    }
}

/// Replace brand handle placeholders in `text` with `handle`.
///
/// Placeholders match ASCII case-insensitively. Run this before any wrapping or measuring:
/// the substituted text, not the placeholder, determines line breaks.
pub fn substitute_handle(text: &str, handle: &str) -> String {
    let handle = normalize_handle(handle);
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while !rest.is_empty() {
        for p in HANDLE_PLACEHOLDERS {
            if let Some(head) = rest.get(..p.len())
                && head.eq_ignore_ascii_case(p)
            {
                out.push_str(&handle);
                rest = &rest[p.len()..];
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}
