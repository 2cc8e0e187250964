pub mod phase;
pub mod project;

pub use phase::*;
pub use project::*;
