//! Safe filename derivation for downloaded media

/// Replace characters that are invalid in filenames and trim the result
/// to a conservative length. Falls back to "video" for empty input.
pub fn to_safe_filename(title: &str) -> String {
    let mut safe: String = title
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    safe = safe.trim_matches(|c: char| c == '.' || c == ' ').to_string();

    if safe.chars().count() > 200 {
        safe = safe.chars().take(200).collect::<String>().trim_end().to_string();
    }

    if safe.is_empty() {
        safe = "video".to_string();
    }
    safe
}
