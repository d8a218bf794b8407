//! Path helpers shared by the similarity engine and the target resolver.
//!
//! All helpers operate on `/`-separated strings; callers feed them relative
//! project paths, never OS paths.

/// Unify separators, lower-case, and drop leading `./` and `/`.
pub fn normalize_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/").to_lowercase();
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    value.trim_start_matches('/').to_string()
}

/// Last path segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the last `/`, or `""` for a bare file name.
pub fn dir_part(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Drop a trailing `.ext` when it looks like a file extension.
///
/// Dotfiles (`.env`) and names without a stem keep their full text.
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 5
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => name,
    }
}

/// File name without its extension.
pub fn bare_name(path: &str) -> &str {
    strip_extension(file_name(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_case_and_prefixes() {
        assert_eq!(normalize_path(".\\Src\\Components\\Button.TSX"), "src/components/button.tsx");
        assert_eq!(normalize_path("/src/index.ts"), "src/index.ts");
        assert_eq!(normalize_path("././a/b.ts"), "a/b.ts");
    }

    #[test]
    fn splits_names_and_directories() {
        assert_eq!(file_name("src/services/quota/index.ts"), "index.ts");
        assert_eq!(dir_part("src/services/quota/index.ts"), "src/services/quota");
        assert_eq!(dir_part("index.ts"), "");
        assert_eq!(bare_name("src/Button.test.tsx"), "Button.test");
        assert_eq!(bare_name("Button"), "Button");
    }

    #[test]
    fn keeps_dotfiles_whole() {
        assert_eq!(strip_extension(".env"), ".env");
        assert_eq!(strip_extension("notes.longextension"), "notes.longextension");
    }
}
