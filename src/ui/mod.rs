// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Views follow the Elm-style "state down, messages up" pattern: they borrow
//! the gallery state and emit messages, holding nothing of their own.
//!
//! - [`thumbnail_list`] - Clickable previews with a remove control
//! - [`featured`] - The large image with its fade-in transition
//! - [`notifications`] - Toast notifications for failures
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod featured;
pub mod notifications;
pub mod theming;
pub mod thumbnail_list;
pub mod widgets;
