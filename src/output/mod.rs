//! Renderers for a completed enumeration. Read-only over the tree.

mod json;
mod xml;

pub use json::write_json;
pub use xml::write_xml;
