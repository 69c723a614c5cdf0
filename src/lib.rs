pub mod classify;
pub mod envelope;
pub mod fetch;
pub mod kind;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod search;
pub mod settings;
pub mod wrapper;

pub use envelope::{aggregate, LinkedinRecord, ResultEnvelope};
pub use kind::EntityKind;
pub use pipeline::{run, CrawlRequest};
