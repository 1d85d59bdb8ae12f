//! Edit Engine - search session, undo/redo history and input debouncing
//!
//! This crate holds the state that sits around the stateless search
//! engine: the current buffer, its snapshot history, and the timing rules
//! for turning bursts of input into single actions.

mod debounce;
mod error;
mod notify;
mod session;
mod undo;

pub use debounce::*;
pub use error::*;
pub use notify::*;
pub use session::*;
pub use undo::*;
