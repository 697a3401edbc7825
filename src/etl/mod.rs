//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building data pipelines
//! that extract data from sources, transform it, and load it to destinations,
//! plus the logging capability the stages report through.

mod extract;
mod load;
mod pipeline;
mod sink;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use sink::{EventSink, LogSink, MemorySink, default_sink};
pub use transform::{Chain, Transformer};
