// SPDX-License-Identifier: MPL-2.0
//! Notification queue.
//!
//! At most [`MAX_VISIBLE`] toasts are on screen; the rest wait in a queue.
//! Pushing a message whose key is already showing refreshes that toast, with
//! the newer arguments, instead of stacking a duplicate, since the gallery retries every tick
//! and would otherwise flood the corner with the same failure.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;
use std::time::Instant;

const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick(Instant),
}

#[derive(Debug, Default)]
pub struct Manager {
    /// Newest first.
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Error => log::error!("notification: {}", notification.message_key()),
            Severity::Warning => log::warn!("notification: {}", notification.message_key()),
            Severity::Info => log::info!("notification: {}", notification.message_key()),
        }

        if let Some(existing) = self
            .visible
            .iter_mut()
            .chain(self.queue.iter_mut())
            .find(|n| n.message_key() == notification.message_key())
        {
            existing.refresh(notification);
            return;
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Returns `true` if the notification was found.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Drops every visible toast whose lifetime has run out at `now`.
    pub fn tick(&mut self, now: Instant) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.is_expired(now));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    /// Removes toasts whose key starts with `prefix`, visible or queued.
    pub fn clear_matching(&mut self, prefix: &str) {
        self.visible.retain(|n| !n.message_key().starts_with(prefix));
        self.queue.retain(|n| !n.message_key().starts_with(prefix));
        self.promote_from_queue();
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick(now) => self.tick(*now),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            let Some(notification) = self.queue.pop_front() else {
                break;
            };
            self.visible.push_back(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, NetworkError};
    use std::time::Duration;

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert!(!manager.has_notifications());
    }

    #[test]
    fn push_queues_when_visible_is_full() {
        let mut manager = Manager::new();
        for i in 0..MAX_VISIBLE {
            manager.push(Notification::info(format!("key-{i}")));
        }
        manager.push(Notification::info("queued"));

        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
    }

    #[test]
    fn repeated_key_does_not_stack() {
        let mut manager = Manager::new();
        manager.push(Notification::warning("notification-fetch-error-timeout"));
        manager.push(Notification::warning("notification-fetch-error-timeout"));

        assert_eq!(manager.visible_count(), 1);
        assert_eq!(manager.queued_count(), 0);
    }

    #[test]
    fn repeated_key_shows_the_latest_arguments() {
        let mut manager = Manager::new();
        manager.push(Notification::from_error(&Error::Network(
            NetworkError::Status(429),
        )));
        manager.push(Notification::from_error(&Error::Network(
            NetworkError::Status(500),
        )));

        assert_eq!(manager.visible_count(), 1);
        let shown = manager.visible().next().map(Notification::message_args);
        assert_eq!(
            shown,
            Some(&[("status".to_string(), "500".to_string())][..])
        );
    }

    #[test]
    fn refresh_restarts_the_lifetime() {
        let mut manager = Manager::new();
        let start = Instant::now();
        manager.push(Notification::warning("retrying").shown_at(start));
        manager.push(Notification::warning("retrying").shown_at(start + Duration::from_secs(5)));

        manager.tick(start + Duration::from_secs(7));
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn dismiss_promotes_from_queue() {
        let mut manager = Manager::new();
        let first = Notification::error("first");
        let first_id = first.id();
        manager.push(first);
        for i in 1..=MAX_VISIBLE {
            manager.push(Notification::error(format!("key-{i}")));
        }
        assert_eq!(manager.queued_count(), 1);

        assert!(manager.dismiss(first_id));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
    }

    #[test]
    fn dismiss_unknown_id_returns_false() {
        let mut manager = Manager::new();
        let stray = Notification::info("stray").id();
        assert!(!manager.dismiss(stray));
    }

    #[test]
    fn tick_expires_warnings_but_keeps_errors() {
        let mut manager = Manager::new();
        let start = Instant::now();
        manager.push(Notification::warning("retrying").shown_at(start));
        manager.push(Notification::error("fatal").shown_at(start));

        manager.handle_message(&Message::Tick(start + Duration::from_secs(60)));

        let keys: Vec<&str> = manager.visible().map(Notification::message_key).collect();
        assert_eq!(keys, vec!["fatal"]);
    }

    #[test]
    fn clear_matching_removes_only_prefixed_keys() {
        let mut manager = Manager::new();
        manager.push(Notification::warning("notification-fetch-error-timeout"));
        manager.push(Notification::warning("notification-fetch-error-transport"));
        manager.push(Notification::warning("notification-decode-error"));
        manager.push(Notification::error("notification-config-load-error"));

        manager.clear_matching("notification-fetch-error-");

        let keys: Vec<&str> = manager.visible().map(Notification::message_key).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.iter().all(|k| !k.starts_with("notification-fetch-error-")));
        assert_eq!(manager.queued_count(), 0);
    }
}
