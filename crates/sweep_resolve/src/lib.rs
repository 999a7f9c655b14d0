//! # sweep_resolve
//!
//! Fixed-point configuration resolution for Cablesweep.
//!
//! This crate turns a declarative parameter mapping into a fully concrete
//! one: references are replaced by the values they name and action nodes
//! collapse to computed numbers, over repeated rewriting passes until
//! nothing changes.
//!
//! ## Architecture Position
//!
//! Engine layer, between the parameter model (`sweep_core`) and the
//! sweep orchestration (`sweep_driver`). Depends only on `sweep_core`.
//!
//! ## Modules
//!
//! - `engine`: The [`Resolver`] and its rewriting loop
//! - `node`: Closed classification of tree nodes (references, actions)
//! - `source`: Comment-tolerant, layered config document loading
//! - `table`: Interpolation table loading from CSV files
//!
//! ## Example
//!
//! ```rust
//! use sweep_resolve::{parse_config, Resolver};
//!
//! let template = parse_config(
//!     r#"{
//!         "block_scale": 0.5, // bound per sweep step
//!         "heat": {"action": "gaussian", "center": 0, "width": 2,
//!                  "height": "block_scale", "input": 0}
//!     }"#,
//! )
//! .unwrap();
//!
//! let resolved = Resolver::new().simplify(&template).unwrap();
//! assert_eq!(resolved["heat"].as_number(), Some(0.5));
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod node;
pub mod source;
pub mod table;

mod error;

pub use engine::{Resolver, DEFAULT_MAX_PASSES};
pub use error::{ResolveError, SourceError};
pub use node::{ActionKind, NodeKind, ACTION_KEY};
pub use source::{load_config, load_layered, merge_layer, parse_config, strip_line_comments};
pub use table::load_table;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::Resolver;
    pub use crate::error::{ResolveError, SourceError};
    pub use crate::node::{ActionKind, NodeKind};
    pub use crate::source::{load_config, load_layered, parse_config};
    pub use crate::table::load_table;
}
