//! Value-changed notifications.

use serde::Serialize;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use thinslider_core::WidgetId;

/// Message emitted every time a slider value is written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderChanged {
    /// Identity of the emitting slider
    pub slider: WidgetId,
    /// User-assigned id, if any
    pub name: Option<String>,
    /// The value after clamping
    pub value: i64,
    /// Percentage of the range covered by `value`
    pub percent: f64,
}

enum Sink {
    None,
    Callback(Box<dyn FnMut(&SliderChanged) + Send>),
    Channel(Sender<SliderChanged>),
}

/// Injected destination for [`SliderChanged`] messages.
///
/// Delivery happens on every write, including writes that leave the value
/// unchanged; nothing is deduplicated.
pub struct ChangeNotifier {
    sink: Sink,
}

impl ChangeNotifier {
    /// A notifier that drops every message.
    #[must_use]
    pub const fn none() -> Self {
        Self { sink: Sink::None }
    }

    /// Deliver messages to a callback.
    pub fn callback(f: impl FnMut(&SliderChanged) + Send + 'static) -> Self {
        Self {
            sink: Sink::Callback(Box::new(f)),
        }
    }

    /// Deliver messages to a channel; returns the receiving end.
    #[must_use]
    pub fn channel() -> (Self, Receiver<SliderChanged>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                sink: Sink::Channel(tx),
            },
            rx,
        )
    }

    /// Deliver messages to an existing channel, so several sliders can share one receiver.
    #[must_use]
    pub fn sender(tx: Sender<SliderChanged>) -> Self {
        Self {
            sink: Sink::Channel(tx),
        }
    }

    /// Deliver one message.
    pub fn notify(&mut self, message: &SliderChanged) {
        match &mut self.sink {
            Sink::None => {}
            Sink::Callback(f) => f(message),
            Sink::Channel(tx) => {
                if tx.send(message.clone()).is_err() {
                    log::debug!("change receiver for {:?} is gone", message.slider);
                }
            }
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.sink {
            Sink::None => "none",
            Sink::Callback(_) => "callback",
            Sink::Channel(_) => "channel",
        };
        f.debug_struct("ChangeNotifier").field("sink", &kind).finish()
    }
}
