//! Application use cases / business logic

pub mod digest_run;
pub mod render;

pub use digest_run::{DigestRun, RunError, RunReport, SectionConfig, SectionError, SourceRun};
pub use render::render_digest;
