/// Quote a string literal, escaping backslashes and double quotes.
///
/// # Examples
/// ```
/// use mdlfmt_core::utils::quote;
/// assert_eq!(quote("plain"), "\"plain\"");
/// assert_eq!(quote("say \"hi\""), r#""say \"hi\"""#);
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Normalize a resource path to forward slashes and strip `media_root`.
///
/// The root is compared after normalization, so `C:\media\` matches
/// `C:/media/brick.png`. A leading slash left over after stripping is removed.
pub fn relative_resource_path(path: &str, media_root: Option<&str>) -> String {
    let normalized = path.replace('\\', "/");
    let Some(root) = media_root.map(|r| r.replace('\\', "/")) else {
        return normalized;
    };
    match normalized.strip_prefix(root.as_str()) {
        Some(rest) if !root.is_empty() => rest.trim_start_matches('/').to_string(),
        _ => normalized,
    }
}

/// `true` for purely numeric argument names (`"0"`, `"12"`).
pub fn is_positional_placeholder(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
