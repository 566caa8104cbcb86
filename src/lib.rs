pub mod collection;
pub mod config;
pub mod error;
pub mod logger;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use collection::{Collection, FixReport, fix_file};
pub use error::{PostkitError, Result};
pub use report::{ReportGenerator, ReportPaths, ReportSummary};
