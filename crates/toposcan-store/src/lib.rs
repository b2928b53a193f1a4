//! Configuration storage for toposcan.
//!
//! - [`line`]: the compact one-line-per-configuration text format
//! - [`db`]: a JSON record database loaded wholesale
//! - [`source`]: reading either from files and directories

pub mod db;
pub mod error;
pub mod line;
pub mod source;

pub use db::RecordDb;
pub use error::{Result, StoreError};
pub use line::{parse_line, to_line};
pub use source::{read_records, InputFormat, InputRecord, ReadSummary};
