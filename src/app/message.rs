// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::gallery::ImageRecord;
use crate::media::Rendition;
use crate::ui::notifications;
use crate::ui::thumbnail_list;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// One rotation period elapsed.
    RotationTick(Instant),
    /// Result of a trending request issued for `Effect::Fetch`.
    TrendingLoaded(Result<Vec<ImageRecord>, Error>),
    RenditionLoaded {
        url: String,
        result: Result<Rendition, Error>,
    },
    Thumbnail(thumbnail_list::Message),
    Notification(notifications::NotificationMessage),
    /// Redraw tick for GIF playback, the fade and the spinner.
    Frame(Instant),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// API key; wins over `GIF_GALLERY_API_KEY` and the config file.
    pub api_key: Option<String>,
    /// `limit` query parameter for the trending request.
    pub limit: Option<u32>,
    /// Rotation period override in milliseconds.
    pub interval_ms: Option<u64>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `GIF_GALLERY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
