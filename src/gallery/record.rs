// SPDX-License-Identifier: MPL-2.0
//! A single trending image as the gallery sees it.

use serde::{Deserialize, Serialize};

/// One fetched image with its two renditions.
///
/// `id` is unique within a gallery list and doubles as the key used to
/// identify thumbnails and the featured-image transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub title: String,
    /// Small still rendition shown in the thumbnail list.
    pub preview_url: String,
    /// Larger animated rendition shown when the record is featured.
    pub featured_url: String,
}

impl ImageRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        preview_url: impl Into<String>,
        featured_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            preview_url: preview_url.into(),
            featured_url: featured_url.into(),
        }
    }
}
