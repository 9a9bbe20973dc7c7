//! Event channel from DOM listeners to controller loops.
//!
//! A `Relay` is the sending half of an unbounded channel. DOM callbacks
//! hold clones of it and fire events; the controller loop owns the receiver
//! and processes events one at a time, so controller state never needs a
//! lock or a `RefCell` shared with the callbacks.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Sending half of a controller's event channel.
///
/// Relays are named after the event source: `question_clicked_relay`,
/// `exit_finished_relay`. In debug builds a relay panics when `send` is
/// called from a second source location, which keeps every event traceable
/// to exactly one listener.
#[derive(Clone, Debug)]
pub struct Relay<T = ()>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

#[derive(Debug, Clone)]
pub enum RelayError {
    /// The controller loop is gone (receiver dropped).
    ChannelClosed,
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Fires an event. Events sent after the loop ended are dropped.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(error) = self.check_single_source() {
            panic!("{error:?}");
        }
        let _ = self.sender.unbounded_send(value);
    }

    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

/// Creates a relay and the stream its controller loop consumes.
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn events_arrive_in_order() {
        let (question_clicked_relay, mut stream) = relay::<usize>();
        for index in [2, 0, 2] {
            question_clicked_relay.send(index);
        }
        assert_eq!(stream.next().await, Some(2));
        assert_eq!(stream.next().await, Some(0));
        assert_eq!(stream.next().await, Some(2));
    }

    #[tokio::test]
    async fn try_send_reports_closed_loop() {
        let (category_selected_relay, stream) = relay::<String>();
        let send = |value: &str| category_selected_relay.try_send(value.to_string());
        assert!(send("Residential").is_ok());
        drop(stream);
        assert!(matches!(send("all"), Err(RelayError::ChannelClosed)));
    }

    #[tokio::test]
    async fn clones_share_one_channel() {
        let (exit_finished_relay, mut stream) = relay::<u64>();
        let listener_copy = exit_finished_relay.clone();
        let emit = |relay: &Relay<u64>, generation| relay.send(generation);
        emit(&exit_finished_relay, 1);
        emit(&listener_copy, 2);
        assert_eq!(stream.next().await, Some(1));
        assert_eq!(stream.next().await, Some(2));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "MultipleEmitters")]
    fn second_emitter_location_panics() {
        let (menu_toggled_relay, _stream) = relay::<bool>();
        menu_toggled_relay.send(true);
        menu_toggled_relay.send(false);
    }
}
