/// Make a site-supplied identifier safe to use as a single file name.
///
/// Path separators, characters Windows rejects and control characters become
/// `_`. A stem made only of dots (or empty) becomes underscores, so the result
/// never names the directory itself or its parent.
pub fn sanitize_file_stem(s: &str) -> String {
    let stem: String = s
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.chars().all(|c| c == '.') {
        "_".repeat(stem.len().max(1))
    } else {
        stem
    }
}
