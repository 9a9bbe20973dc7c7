//! Single-value state owned by one event loop.
//!
//! Controllers that other code needs to observe (the active portfolio
//! filter, for example) keep their value in an `Actor`: the loop is the
//! only writer, everyone else reads through [`Actor::signal`].

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Reactive value mutated only by its processor loop.
///
/// ```rust,ignore
/// let (category_selected_relay, mut category_selected_stream) = relay::<String>();
///
/// let active_filter = Actor::new(CategoryFilter::All, move |state| async move {
///     while let Some(value) = category_selected_stream.next().await {
///         state.set_neq(CategoryFilter::parse(&value));
///     }
/// });
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    // dropping the last clone stops the loop
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    creation_location: &'static std::panic::Location<'static>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Starts `processor` with a handle to the state it owns.
    #[track_caller]
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));

        Self {
            state,
            task_handle,
            #[cfg(debug_assertions)]
            creation_location: std::panic::Location::caller(),
        }
    }

    /// Current value followed by every change.
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }
}
