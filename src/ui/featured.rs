// SPDX-License-Identifier: MPL-2.0
//! Featured image slot with a fade-in transition.
//!
//! The fade restarts only when the featured *id* changes. Rotation sets a new
//! id, manual selection keeps the old one, so a clicked thumbnail swaps in
//! without replaying the transition.

use crate::gallery::FeaturedSlot;
use crate::i18n::fluent::I18n;
use crate::media::{CacheEntry, RenditionCache};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{text, Column, Container, Image, Space};
use iced::{alignment, ContentFit, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Opacity `elapsed` into a fade of length `duration`, in `[0, 1]`.
#[must_use]
pub fn fade_opacity(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Remembers which key the current fade belongs to.
#[derive(Debug, Clone)]
pub struct FadeTracker {
    key: Option<String>,
    started: Instant,
    duration: Duration,
}

impl FadeTracker {
    #[must_use]
    pub fn new(duration: Duration, now: Instant) -> Self {
        Self {
            key: None,
            started: now,
            duration,
        }
    }

    /// Restarts the fade if `key` differs from the last one seen.
    /// Returns `true` when a new fade started.
    pub fn observe(&mut self, key: Option<&str>, now: Instant) -> bool {
        if self.key.as_deref() == key {
            return false;
        }
        self.key = key.map(str::to_owned);
        self.started = now;
        true
    }

    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        fade_opacity(now.saturating_duration_since(self.started), self.duration)
    }

    #[must_use]
    pub fn is_running(&self, now: Instant) -> bool {
        self.opacity(now) < 1.0
    }
}

/// Renders `slot`, picking the animation frame for `animation_elapsed`.
pub fn view<'a, Message: 'a>(
    slot: FeaturedSlot<'a>,
    cache: &'a RenditionCache,
    i18n: &'a I18n,
    fade: &FadeTracker,
    now: Instant,
    animation_elapsed: Duration,
) -> Element<'a, Message> {
    let FeaturedSlot::Image { url, .. } = slot else {
        return Space::new().into();
    };

    let content: Element<'a, Message> = match cache.peek(url) {
        Some(CacheEntry::Ready(rendition)) => {
            Image::new(rendition.frame_at(animation_elapsed).clone())
                .height(Length::Fixed(sizing::FEATURED_HEIGHT))
                .content_fit(ContentFit::Contain)
                .opacity(fade.opacity(now))
                .into()
        }
        Some(CacheEntry::Failed(_)) => text(i18n.tr("featured-unavailable"))
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.extended_palette().danger.base.color),
            })
            .into(),
        Some(CacheEntry::Pending) | None => Column::new()
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center)
            .push(
                AnimatedSpinner::new(palette::HEADER, animation_elapsed)
                    .size(sizing::SPINNER / 2.0)
                    .into_element(),
            )
            .push(text(i18n.tr("featured-loading")).size(typography::CAPTION))
            .into(),
    };

    Container::new(content)
        .center_x(Length::Fill)
        .height(Length::Fixed(sizing::FEATURED_HEIGHT))
        .align_y(alignment::Vertical::Center)
        .into()
}
