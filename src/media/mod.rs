// SPDX-License-Identifier: MPL-2.0
//! Remote renditions: download, decode and cache.
//!
//! The gallery only knows URLs. This module turns them into frames the UI can
//! draw: [`fetch_rendition`] downloads and decodes one URL off the UI thread,
//! and [`RenditionCache`] keeps the results keyed by URL.

mod cache;
mod rendition;

pub use cache::{CacheEntry, RenditionCache};
pub use rendition::{decode_rendition, Frame, Rendition};

use crate::error::{Error, Result};
use crate::source;

/// Upper bound for a single downloaded rendition.
pub const MAX_RENDITION_BYTES: u64 = 16 * 1024 * 1024;

/// Downloads `url` and decodes it on a blocking worker thread.
pub async fn fetch_rendition(http: reqwest::Client, url: String) -> Result<Rendition> {
    let response = http.get(&url).send().await?;
    let bytes = source::read_body(response, MAX_RENDITION_BYTES).await?;

    tokio::task::spawn_blocking(move || decode_rendition(&bytes))
        .await
        .map_err(|e| Error::Decode(e.to_string()))?
}
