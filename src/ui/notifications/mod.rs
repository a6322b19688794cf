// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for fetch and decode failures.
//!
//! - [`notification`] holds a single message with its severity and age
//! - [`manager`] queues notifications and expires them on ticks
//! - [`toast`] renders the visible ones in the bottom-right corner
//!
//! Messages are stored as i18n keys and resolved at render time, so a
//! locale switch applies to toasts already on screen.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
