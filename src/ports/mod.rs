//! Port traits defining external boundaries.
//!
//! The rewrite engine only touches the outside world through the
//! filesystem. Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{FileSystem, PortResult};
