// SPDX-License-Identifier: MPL-2.0
//! Subscriptions: window events, the rotation timer and the redraw clock.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Redraw period while something on screen is moving (about 30 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Routes window close requests so the gallery can tear down first.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| {
        if let event::Event::Window(iced::window::Event::CloseRequested) = event {
            Some(Message::WindowCloseRequested(window_id))
        } else {
            None
        }
    })
}

/// The rotation timer. Dropping the subscription releases it, so it only
/// exists while the gallery is ticking.
pub fn create_rotation_subscription(ticking: bool, interval: Duration) -> Subscription<Message> {
    if ticking {
        time::every(interval).map(Message::RotationTick)
    } else {
        Subscription::none()
    }
}

/// Redraw clock for animations and toast expiry; idle when nothing moves.
pub fn create_frame_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        time::every(FRAME_INTERVAL).map(Message::Frame)
    } else {
        Subscription::none()
    }
}
