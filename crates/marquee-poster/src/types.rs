// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OMDb response types.

use serde::Deserialize;

/// The subset of an OMDb title record the resolver reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbResponse {
    /// `"True"` or `"False"`.
    #[serde(rename = "Response", default)]
    pub response: String,

    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,

    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbResponse {
    /// The poster URL, if the lookup succeeded and OMDb has real artwork.
    pub fn usable_poster(&self) -> Option<&str> {
        if self.response != "True" {
            return None;
        }
        self.poster
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != "N/A")
    }
}
