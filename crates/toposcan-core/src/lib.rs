//! toposcan core - block model, gluing and classification
//!
//! This crate provides the building blocks for topology enumeration:
//! - Typed blocks and their local intersection forms
//! - Gluing graphs validated against a data-driven rule table
//! - Spectral classification of composed forms into SCFT / LST
//! - Decorated chain configurations and their growth tables

pub mod block;
pub mod configuration;
pub mod error;
pub mod graph;
pub mod growth;
pub mod layout;
pub mod local_form;
pub mod matrix;
pub mod port;
pub mod rules;
pub mod spectral;
pub mod theory;

pub use block::{Block, BlockKind, LinkFamily, Spec};
pub use configuration::{
    is_unimodal, Attachment, ChainBlock, ChainKind, Configuration, DecorationKind, Record,
};
pub use error::{Result, TopoError};
pub use graph::GluingGraph;
pub use growth::{DecorationBank, GrowthTable, Successors};
pub use layout::Layout;
pub use local_form::{build_local_form, CurveChain};
pub use matrix::{block_diagonal, empty_form, write_matrix_rows, FormDisplay, IntersectionForm};
pub use port::{Edge, NodeRef, Port};
pub use rules::{Endpoint, NodeCondition, PairRule, PortRule, RuleSet, RuleTable};
pub use spectral::{Category, ClassifierStrategy, SpectralClassifier, DEFAULT_TOLERANCE};
pub use theory::{Segment, Theory};
