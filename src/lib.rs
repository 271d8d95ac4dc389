pub mod cli;
pub mod error;
pub mod galaxy;
pub mod index;
pub mod model;
pub mod normalize;
pub mod raw;
pub mod report;
pub mod schema;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::DataError;
pub use index::{DuplicatePolicy, ResourceIndex};
pub use report::{ConsoleReport, RecordingReport, Report, SilentReport};
