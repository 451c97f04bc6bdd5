//! Data model for enumeration results.
//!
//! - [`CpuIdRegister`] — one query result (input selectors, output quad,
//!   validity)
//! - [`CpuIdProcessor`] — ordered, insert-only leaf store for one logical
//!   processor
//! - [`CpuIdTree`] — processor index to leaf store, the result of a full run

mod processor;
mod register;
#[allow(clippy::module_inception)]
mod tree;

pub use processor::{CpuIdProcessor, DuplicateLeaf};
pub use register::CpuIdRegister;
pub use tree::{CpuIdTree, DuplicateProcessor};
