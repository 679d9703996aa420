//! Filesystem-backed implementations of the deckpress I/O seams.
//!
//! - [`FilesystemResourceProvider`]: reads card images from an asset directory
//! - [`FilesystemOutputSink`]: writes atlases, sheets and documents under an output directory
//!
//! The in-memory variants from deckpress-traits are re-exported for convenience.

mod filesystem;
mod sink;

pub use filesystem::FilesystemResourceProvider;
pub use sink::FilesystemOutputSink;

pub use deckpress_traits::{InMemoryOutputSink, InMemoryResourceProvider};
