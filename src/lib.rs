//! docref: verify inline code references in documentation
//!
//! Every inline code span in the matched markdown files must appear verbatim
//! somewhere in the project's source files. Spans that do not are reported as
//! broken references.

pub mod check;
pub mod config;
pub mod corpus;
pub mod discover;
pub mod error;
pub mod extract;
pub mod logging;
pub mod report;
pub mod validate;

pub use check::{check, run_check, CheckArgs, OutputFormat};
pub use config::{CheckConfig, ConfigFile};
pub use corpus::SourceCorpus;
pub use error::CheckError;
pub use extract::{extract_inline_code, DocumentReferences};
pub use report::{CheckReport, CheckSummary, Outcome, SkipReason, FAILURE_MESSAGE};
pub use validate::{find_broken, BrokenReference};
