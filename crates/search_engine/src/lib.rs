//! Search Engine - matching, highlighting and replacement over text buffers
//!
//! Every operation is a pure function of the buffer and the compiled
//! pattern: buffers go in by reference and new buffers come out.

mod error;
mod highlight;
mod matcher;
mod options;
mod pattern;
mod proximity;
mod replace;
mod stats;
mod suggestions;

pub use error::*;
pub use highlight::*;
pub use matcher::*;
pub use options::*;
pub use pattern::*;
pub use proximity::*;
pub use replace::*;
pub use stats::*;
pub use suggestions::*;
