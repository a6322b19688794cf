// SPDX-License-Identifier: MPL-2.0
//! `gif_gallery` shows trending GIFs in a window built with the Iced GUI
//! framework.
//!
//! A featured image rotates every few seconds; a thumbnail list below it lets
//! the user feature or remove individual images. The rotation and selection
//! rules live in [`gallery`], free of any I/O, and [`app`] wires them to the
//! network ([`source`], [`media`]) and the widgets in [`ui`].

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod media;
pub mod source;
pub mod ui;
