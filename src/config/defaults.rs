// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Rotation**: Featured-image rotation period
//! - **Transition**: Fade-in of a newly featured image
//! - **Source**: Trending-images endpoint and request limits
//! - **Cache**: Downloaded rendition cache

// ==========================================================================
// Rotation Defaults
// ==========================================================================

/// Default period between two automatic rotations of the featured image.
pub const DEFAULT_ROTATION_INTERVAL_MS: u64 = 3000;

/// Minimum rotation period.
pub const MIN_ROTATION_INTERVAL_MS: u64 = 500;

/// Maximum rotation period.
pub const MAX_ROTATION_INTERVAL_MS: u64 = 60_000;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Default fade-in duration when the featured record changes.
pub const DEFAULT_TRANSITION_MS: u64 = 1000;

/// Maximum fade-in duration (0 disables the transition).
pub const MAX_TRANSITION_MS: u64 = 5000;

// ==========================================================================
// Source Defaults
// ==========================================================================

/// Trending endpoint queried for the image list.
pub const DEFAULT_ENDPOINT: &str = "https://api.giphy.com/v1/gifs/trending";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Largest `limit` query parameter the API accepts.
pub const MAX_LIMIT: u32 = 50;

// ==========================================================================
// Cache Defaults
// ==========================================================================

/// Default number of downloaded renditions kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Smallest useful cache: a full page of previews plus a few featured renditions.
pub const MIN_CACHE_CAPACITY: usize = 64;

/// Upper bound on cached renditions.
pub const MAX_CACHE_CAPACITY: usize = 512;
