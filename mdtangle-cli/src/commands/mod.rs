//! CLI command implementations.

mod helpers;
pub mod list;
pub mod show;
pub mod tangle;
pub mod watch;

pub use list::{list, ListOptions};
pub use show::show;
pub use tangle::{tangle, TangleOptions};
pub use watch::{watch, WatchOptions};
