//! File system access and output transactions.

mod file_cache;
mod transaction;

pub use file_cache::{FileCache, RealFileCache, VirtualFS};
pub use transaction::{Transaction, WriteAction};
