// SPDX-License-Identifier: MPL-2.0
//! Poll timer subscription.
//!
//! The timer is keyed by a generation counter: bumping the generation makes
//! the Iced runtime drop the old timer stream and start a fresh one, so a
//! query change re-arms the interval instead of accumulating a second timer.
//! Dropping the subscription entirely (teardown) cancels it.

use super::Message;
use iced::futures::SinkExt;
use iced::{stream, Subscription};
use std::time::Duration;

/// Identity for the poll timer stream. Timers with different generations
/// never coexist; the runtime replaces one with the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PollTimerId(u64);

/// Emits a [`Message::Tick`] every `period`, keyed by `generation`.
pub fn poll(generation: u64, period: Duration) -> Subscription<Message> {
    Subscription::run_with(
        (PollTimerId(generation), period),
        |&(_id, period)| {
            stream::channel(1, move |mut output: iced::futures::channel::mpsc::Sender<Message>| async move {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                // The first interval tick resolves immediately; the controller
                // already loads on start and on query change, so skip it.
                interval.tick().await;
                loop {
                    let instant = interval.tick().await;
                    let _ = output.send(Message::Tick(instant.into_std())).await;
                }
            })
        },
    )
}
