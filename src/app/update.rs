// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Handlers turn gallery [`Effect`]s into tasks and keep the rendition cache
//! stocked with whatever the current list and featured slot need.

use super::Message;
use crate::error::Error;
use crate::gallery::{Effect, FetchOutcome, GalleryController, ImageRecord};
use crate::media::{self, Rendition, RenditionCache};
use crate::source::GiphyClient;
use crate::ui::featured::FadeTracker;
use crate::ui::notifications::{self, Notification};
use crate::ui::thumbnail_list;
use iced::Task;
use std::time::Instant;

/// Key prefix shared by all trending-request failures.
const FETCH_ERROR_PREFIX: &str = "notification-fetch-error-";

/// Mutable state the handlers work on.
pub struct UpdateContext<'a> {
    pub gallery: &'a mut GalleryController,
    pub client: &'a Result<GiphyClient, Error>,
    pub cache: &'a mut RenditionCache,
    pub notifications: &'a mut notifications::Manager,
    pub fade: &'a mut FadeTracker,
    pub now: Instant,
}

/// Runs the side effect a gallery operation asked for.
pub fn run_effect(ctx: &UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::Fetch => match ctx.client {
            Ok(client) => Task::perform(client.clone().fetch_trending(), Message::TrendingLoaded),
            Err(err) => Task::done(Message::TrendingLoaded(Err(err.clone()))),
        },
    }
}

pub fn handle_rotation_tick(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let effect = ctx.gallery.on_tick(&mut rand::rng());
    ctx.fade.observe(ctx.gallery.featured_id(), ctx.now);
    let fetch = run_effect(ctx, effect);
    Task::batch([fetch, request_renditions(ctx)])
}

pub fn handle_trending_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<Vec<ImageRecord>, Error>,
) -> Task<Message> {
    match ctx.gallery.apply_fetch(result) {
        FetchOutcome::Applied { .. } => {
            ctx.notifications.clear_matching(FETCH_ERROR_PREFIX);
            ctx.fade.observe(ctx.gallery.featured_id(), ctx.now);
            request_renditions(ctx)
        }
        FetchOutcome::Failed(err) => {
            ctx.notifications.push(Notification::from_error(&err));
            Task::none()
        }
        FetchOutcome::NoRecords | FetchOutcome::Discarded | FetchOutcome::Ignored => Task::none(),
    }
}

pub fn handle_rendition_loaded(
    ctx: &mut UpdateContext<'_>,
    url: String,
    result: Result<Rendition, Error>,
) -> Task<Message> {
    if let Err(err) = &result {
        if ctx.gallery.featured_url() == Some(url.as_str()) {
            ctx.notifications.push(Notification::from_error(err));
        }
    }
    ctx.cache.insert_result(url, result);
    Task::none()
}

pub fn handle_thumbnail_message(
    ctx: &mut UpdateContext<'_>,
    message: thumbnail_list::Message,
) -> Task<Message> {
    message.apply(&mut *ctx.gallery);
    request_renditions(ctx)
}

/// Starts downloads for every preview in the list and for the featured URL.
///
/// URLs already cached or pending are only touched, so the ones on screen
/// stay at the hot end of the LRU. The featured URL goes last. The cache is
/// grown to hold every URL of one pass, otherwise the pass would evict its
/// own earliest previews and the next tick would download them again.
pub fn request_renditions(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Ok(client) = ctx.client else {
        return Task::none();
    };

    let urls: Vec<String> = ctx
        .gallery
        .images()
        .iter()
        .map(|record| record.preview_url.clone())
        .chain(ctx.gallery.featured_url().map(str::to_owned))
        .collect();
    ctx.cache.grow_to(urls.len());

    let mut tasks = Vec::new();
    for url in urls {
        if !ctx.cache.needs_fetch(&url) {
            ctx.cache.touch(&url);
            continue;
        }
        ctx.cache.mark_pending(url.clone());
        let http = client.http().clone();
        tasks.push(Task::perform(
            media::fetch_rendition(http, url.clone()),
            move |result| Message::RenditionLoaded { url, result },
        ));
    }
    Task::batch(tasks)
}
