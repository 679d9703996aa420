pub mod output;
pub mod resource;

pub use output::{InMemoryOutputSink, OutputError, OutputSink};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
