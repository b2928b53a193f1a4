//! Shared test fixtures for toposcan crates.
//!
//! - [`cases`] - the canonical gluing and classification cases
//! - [`growth`] - a small growth table with known outcomes
//! - [`files`] - input files for pipeline tests
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! toposcan-test = { workspace = true }
//! ```
//!
//! ```
//! use toposcan_test::cases::{single_node_graph, single_node_form};
//!
//! assert_eq!(single_node_graph().compose(), single_node_form());
//! ```

pub mod files;
pub mod growth;
pub mod cases;

pub use files::{read_or_empty, write_lines};
pub use growth::small_growth_table;
pub use cases::{chain, record};
