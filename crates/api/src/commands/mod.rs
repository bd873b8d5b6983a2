//! CLI commands - argument structs in, reports out

mod drivers;
mod timeline;

pub use drivers::*;
pub use timeline::*;
