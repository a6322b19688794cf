// SPDX-License-Identifier: MPL-2.0
//! Mapping of the trending response body onto [`ImageRecord`]s.
//!
//! Only the fields the gallery uses are modelled:
//!
//! ```text
//! { "data": [ { "id", "title",
//!               "images": { "downsized_still": { "url" },
//!                           "fixed_height":    { "url" } } } ] }
//! ```

use crate::error::Result;
use crate::gallery::ImageRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    data: Vec<RawGif>,
}

#[derive(Debug, Deserialize)]
struct RawGif {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    images: RawRenditions,
}

#[derive(Debug, Default, Deserialize)]
struct RawRenditions {
    #[serde(default)]
    downsized_still: Option<RawRendition>,
    #[serde(default)]
    fixed_height: Option<RawRendition>,
}

#[derive(Debug, Deserialize)]
struct RawRendition {
    #[serde(default)]
    url: Option<String>,
}

impl RawRendition {
    fn url(rendition: Option<RawRendition>) -> Option<String> {
        rendition
            .and_then(|r| r.url)
            .filter(|url| !url.is_empty())
    }
}

impl RawGif {
    fn into_record(self) -> Option<ImageRecord> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let preview_url = RawRendition::url(self.images.downsized_still)?;
        let featured_url = RawRendition::url(self.images.fixed_height)?;
        Some(ImageRecord {
            id,
            title: self.title.unwrap_or_default(),
            preview_url,
            featured_url,
        })
    }
}

/// Parses a trending response body, in response order.
///
/// Entries lacking an id or either rendition are skipped. A body without a
/// `data` array is an error.
pub fn parse_trending(body: &str) -> Result<Vec<ImageRecord>> {
    let response: TrendingResponse = serde_json::from_str(body)?;
    let total = response.data.len();
    let records: Vec<ImageRecord> = response
        .data
        .into_iter()
        .filter_map(RawGif::into_record)
        .collect();

    if records.len() < total {
        log::debug!(
            "skipped {} trending entries without usable renditions",
            total - records.len()
        );
    }
    Ok(records)
}
