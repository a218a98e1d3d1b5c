// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IMDb-style catalog identifiers embedded in file names.

use std::sync::LazyLock;

use regex::Regex;

/// `tt` + 7 or 8 digits, optionally tagged `imdb`/`id` and bracketed.
static CATALOG_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\[|\{|\()?(?:imdb[-\s]?)?(?:id[-\s]?)?(tt\d{7,8})(?:\]|\}|\))?").unwrap()
});

/// Returns the first catalog identifier in `file_name`, lower-cased.
pub fn extract_catalog_id(file_name: &str) -> Option<String> {
    CATALOG_ID
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_identifier() {
        assert_eq!(
            extract_catalog_id("Alien.1979.tt0078748.mkv").as_deref(),
            Some("tt0078748")
        );
    }

    #[test]
    fn bracketed_and_tagged_identifiers() {
        for name in [
            "Alien (1979) [imdb-tt0078748].mkv",
            "Alien (1979) {imdb tt0078748}.mkv",
            "Alien (1979) (id-tt0078748).mkv",
            "Alien [IMDBID TT0078748].mkv",
        ] {
            assert_eq!(
                extract_catalog_id(name).as_deref(),
                Some("tt0078748"),
                "{name}"
            );
        }
    }

    #[test]
    fn eight_digit_identifier() {
        assert_eq!(
            extract_catalog_id("Show.S01E01.[tt12345678].mkv").as_deref(),
            Some("tt12345678")
        );
    }

    #[test]
    fn too_short_is_ignored() {
        assert_eq!(extract_catalog_id("Clip.tt123456.mkv"), None);
        assert_eq!(extract_catalog_id("Movie.Title.1999.mkv"), None);
    }
}
