// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::gallery::GalleryController;
use crate::i18n::fluent::I18n;
use crate::media::RenditionCache;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::featured::{self, FadeTracker};
use crate::ui::notifications::{self, Toast};
use crate::ui::thumbnail_list;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{scrollable, text, Column, Container, Row, Space, Stack};
use iced::{alignment, Element, Length};
use std::time::{Duration, Instant};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a GalleryController,
    pub cache: &'a RenditionCache,
    pub notifications: &'a notifications::Manager,
    pub fade: &'a FadeTracker,
    pub now: Instant,
    pub animation_elapsed: Duration,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body: Element<'_, Message> = if ctx.gallery.images().is_empty() {
        view_loading(ctx.i18n, ctx.animation_elapsed)
    } else {
        view_gallery(&ctx)
    };

    let content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(view_header(ctx.i18n, ctx.gallery.images().len()))
        .push(body);

    Stack::new()
        .push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .into()
}

fn view_header(i18n: &I18n, count: usize) -> Element<'_, Message> {
    let mut header = Row::new()
        .align_y(alignment::Vertical::Bottom)
        .push(
            text(i18n.tr("gallery-header"))
                .size(typography::TITLE_SM)
                .color(palette::HEADER),
        )
        .push(Space::new().width(Length::Fill));

    if count > 0 {
        let count = count.to_string();
        header = header.push(
            text(i18n.tr_with_args("gallery-count", &[("count", count.as_str())]))
                .size(typography::CAPTION)
                .color(palette::HEADER),
        );
    }

    header.into()
}

fn view_loading(i18n: &I18n, elapsed: Duration) -> Element<'_, Message> {
    let column = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(AnimatedSpinner::new(palette::HEADER, elapsed).into_element())
        .push(text(i18n.tr("gallery-loading")).size(typography::BODY));

    Container::new(column)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn view_gallery<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let featured = featured::view(
        ctx.gallery.featured_slot(),
        ctx.cache,
        ctx.i18n,
        ctx.fade,
        ctx.now,
        ctx.animation_elapsed,
    );

    let thumbnails =
        thumbnail_list::view(ctx.gallery.images(), ctx.cache, ctx.i18n).map(Message::Thumbnail);

    Column::new()
        .spacing(spacing::LG)
        .push(featured)
        .push(scrollable(thumbnails).height(Length::Fill))
        .into()
}
