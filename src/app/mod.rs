// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! `App` owns the [`GalleryController`] and everything the controller does
//! not: the HTTP client, downloaded renditions, toasts and animation clocks.
//! The iced runtime is the single logical thread; fetches and downloads run
//! as `Task`s and come back as messages, and the rotation timer is a
//! subscription that exists only while the gallery is ticking.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::error::Error;
use crate::gallery::GalleryController;
use crate::i18n::fluent::I18n;
use crate::media::{CacheEntry, RenditionCache};
use crate::source::{GiphyClient, TrendingRequest};
use crate::ui::featured::FadeTracker;
use crate::ui::notifications::{self, Notification};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::{Duration, Instant};

pub const WINDOW_DEFAULT_WIDTH: f32 = 720.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 820.0;
pub const MIN_WINDOW_WIDTH: f32 = 420.0;
pub const MIN_WINDOW_HEIGHT: f32 = 520.0;

/// Root Iced application state.
pub struct App {
    i18n: I18n,
    gallery: GalleryController,
    client: Result<GiphyClient, Error>,
    cache: RenditionCache,
    notifications: notifications::Manager,
    /// Resolved once at startup; system detection is too slow for redraws.
    theme: Theme,
    rotation_interval: Duration,
    fade: FadeTracker,
    /// Shared clock for GIF playback and the spinner.
    animation_started: Instant,
    /// Time of the latest redraw tick.
    now: Instant,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("phase", &self.gallery.phase())
            .field("images", &self.gallery.images().len())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Builds the window settings.
///
/// Close requests are handled by the app so the gallery is torn down before
/// the window goes away.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Applies CLI overrides on top of the loaded config.
fn apply_flag_overrides(config: &mut Config, flags: &Flags) {
    if let Some(limit) = flags.limit {
        config.source.limit = Some(limit);
    }
    if let Some(interval_ms) = flags.interval_ms {
        config.gallery.rotation_interval_ms = Some(interval_ms);
    }
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut config, config_warning) = config::load();
        apply_flag_overrides(&mut config, &flags);

        let i18n = I18n::new(flags.lang.clone(), &config);
        let api_key = config::resolve_api_key(flags.api_key, &config);
        if api_key.is_none() {
            log::warn!(
                "no API key configured; set {} or pass --api-key",
                config::ENV_API_KEY
            );
        }

        let mut app = Self::from_config(&config, api_key, i18n);
        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let task = app.start();
        (app, task)
    }

    /// Builds the app without touching the network.
    pub fn from_config(config: &Config, api_key: Option<String>, i18n: I18n) -> Self {
        let request = TrendingRequest::from_config(&config.source, api_key);
        let client = GiphyClient::new(request);
        if let Err(err) = &client {
            log::error!("HTTP client unavailable: {err}");
        }

        let now = Instant::now();
        Self {
            i18n,
            gallery: GalleryController::new(),
            client,
            cache: RenditionCache::new(config.gallery.cache_capacity()),
            notifications: notifications::Manager::new(),
            theme: config.general.theme_mode.iced_theme(),
            rotation_interval: config.gallery.rotation_interval(),
            fade: FadeTracker::new(config.gallery.transition(), now),
            animation_started: now,
            now,
        }
    }

    /// Mounts the gallery: first fetch plus the rotation timer.
    pub fn start(&mut self) -> Task<Message> {
        let effect = self.gallery.initialize();
        update::run_effect(&self.context(), effect)
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryController {
        &self.gallery
    }

    #[must_use]
    pub fn cache(&self) -> &RenditionCache {
        &self.cache
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    #[must_use]
    pub fn rotation_interval(&self) -> Duration {
        self.rotation_interval
    }

    fn context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            gallery: &mut self.gallery,
            client: &self.client,
            cache: &mut self.cache,
            notifications: &mut self.notifications,
            fade: &mut self.fade,
            now: self.now,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    /// Whether anything on screen changes without user input.
    fn is_animating(&self) -> bool {
        if self.notifications.has_notifications() || self.fade.is_running(self.now) {
            return true;
        }
        if self.gallery.images().is_empty() {
            // Loading spinner.
            return self.gallery.is_ticking();
        }
        match self.gallery.featured_url().and_then(|url| self.cache.peek(url)) {
            Some(CacheEntry::Ready(rendition)) => rendition.is_animated(),
            Some(CacheEntry::Pending) => true,
            Some(CacheEntry::Failed(_)) | None => false,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_rotation_subscription(
                self.gallery.is_ticking(),
                self.rotation_interval,
            ),
            subscription::create_frame_subscription(self.is_animating()),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::RotationTick(instant) => {
                self.now = self.now.max(instant);
                update::handle_rotation_tick(&mut self.context())
            }
            Message::TrendingLoaded(result) => {
                self.now = self.now.max(Instant::now());
                update::handle_trending_loaded(&mut self.context(), result)
            }
            Message::RenditionLoaded { url, result } => {
                update::handle_rendition_loaded(&mut self.context(), url, result)
            }
            Message::Thumbnail(thumbnail_message) => {
                update::handle_thumbnail_message(&mut self.context(), thumbnail_message)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Frame(now) => {
                self.now = now;
                self.notifications.tick(now);
                Task::none()
            }
            Message::WindowCloseRequested(_id) => {
                self.gallery.teardown();
                iced::exit()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            gallery: &self.gallery,
            cache: &self.cache,
            notifications: &self.notifications,
            fade: &self.fade,
            now: self.now,
            animation_elapsed: self.now.saturating_duration_since(self.animation_started),
        })
    }
}
