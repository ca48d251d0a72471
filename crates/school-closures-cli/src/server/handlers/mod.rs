//! API request handlers.

mod export;
mod records;
mod summary;

pub use export::*;
pub use records::*;
pub use summary::*;
