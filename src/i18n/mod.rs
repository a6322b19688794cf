// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded in the binary at build time.
//!
//! # Features
//!
//! - Locale resolution from CLI, config, or system settings
//! - Runtime language switching
//! - Argument interpolation (`{ $count }`)
//! - Visible `MISSING:` marker when a key has no translation

pub mod fluent;
