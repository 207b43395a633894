//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` after
//! processing each event; the runtime in `main.rs` executes them in order.
//!
//! # Example
//!
//! ```rust
//! use notehub::app::Action;
//! use notehub::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::render_route(None))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a request to the background fetch worker.
    ///
    /// Used for every network call and for debounce timers, so the event
    /// loop itself never waits.
    PostToWorker(WorkerMessage),

    /// Stops the event loop and exits the program.
    Quit,
}
