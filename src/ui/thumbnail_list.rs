// SPDX-License-Identifier: MPL-2.0
//! Thumbnail list below the featured image.
//!
//! Stateless: everything is derived from the gallery's records and the
//! rendition cache, and every click is forwarded as a [`Message`] that the
//! application hands to the controller through [`GalleryActions`].

use crate::gallery::{GalleryActions, ImageRecord};
use crate::i18n::fluent::I18n;
use crate::media::{CacheEntry, RenditionCache};
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::widget::{button, container, text, Column, Container, Image, Row, Text};
use iced::{alignment, Background, Border, Color, ContentFit, Element, Length, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Carries the record's featured URL, not its id.
    Select(String),
    /// Carries the record's id.
    Remove(String),
}

impl Message {
    /// Forwards the intent unchanged.
    pub fn apply(self, actions: &mut impl GalleryActions) {
        match self {
            Message::Select(url) => actions.select_image(url),
            Message::Remove(id) => actions.remove_image(&id),
        }
    }
}

/// What a thumbnail cell shows for its preview URL.
#[derive(Debug, Clone, Copy)]
pub enum Preview<'a> {
    Ready(&'a Handle),
    Loading,
    Unavailable,
}

impl<'a> Preview<'a> {
    #[must_use]
    pub fn lookup(cache: &'a RenditionCache, url: &str) -> Self {
        match cache.peek(url) {
            Some(CacheEntry::Ready(rendition)) => Preview::Ready(rendition.first_frame()),
            Some(CacheEntry::Failed(_)) => Preview::Unavailable,
            Some(CacheEntry::Pending) | None => Preview::Loading,
        }
    }
}

pub fn view<'a>(
    images: &'a [ImageRecord],
    cache: &'a RenditionCache,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    Column::with_children(images.iter().map(|record| item(record, cache, i18n)))
        .spacing(spacing::SM)
        .width(Length::Fill)
        .into()
}

fn item<'a>(
    record: &'a ImageRecord,
    cache: &'a RenditionCache,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match Preview::lookup(cache, &record.preview_url) {
        Preview::Ready(handle) => Image::new(handle.clone())
            .width(Length::Fixed(sizing::THUMBNAIL))
            .height(Length::Fixed(sizing::THUMBNAIL))
            .content_fit(ContentFit::Contain)
            .into(),
        Preview::Loading => placeholder(i18n.tr("thumbnail-loading")),
        Preview::Unavailable => placeholder(i18n.tr("thumbnail-unavailable")),
    };

    let thumbnail = button(preview)
        .padding(0.0)
        .style(thumbnail_style)
        .on_press(Message::Select(record.featured_url.clone()));

    let remove = button(Text::new(i18n.tr("thumbnail-remove")).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(button::secondary)
        .on_press(Message::Remove(record.id.clone()));

    let details = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(record.title.as_str()).size(typography::BODY))
        .push(remove);

    Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(thumbnail)
        .push(details)
        .into()
}

fn placeholder<'a>(label: String) -> Element<'a, Message> {
    Container::new(text(label).size(typography::CAPTION))
        .center_x(Length::Fixed(sizing::THUMBNAIL))
        .center_y(Length::Fixed(sizing::THUMBNAIL))
        .style(|theme: &Theme| container::Style {
            background: Some(Background::Color(
                theme.extended_palette().background.weak.color,
            )),
            border: Border {
                radius: radius::SM.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

fn thumbnail_style(_theme: &Theme, status: button::Status) -> button::Style {
    let highlight = match status {
        button::Status::Hovered => opacity::OVERLAY_MEDIUM,
        button::Status::Pressed => opacity::OVERLAY_STRONG,
        button::Status::Active | button::Status::Disabled => opacity::TRANSPARENT,
    };
    button::Style {
        background: None,
        border: Border {
            color: Color {
                a: highlight,
                ..palette::PRIMARY_400
            },
            width: 2.0,
            radius: radius::SM.into(),
        },
        ..button::Style::default()
    }
}
