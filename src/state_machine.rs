//! Conversation controller state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The runtime in `controller` executes the effects this module emits.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{Phase, Session};
pub use transition::{transition, AdmissionRejected, TransitionError};
