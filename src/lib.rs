//! cpudump - CPUID enumeration library.
//!
//! Discovers, for every logical processor, the complete set of valid CPUID
//! (leaf, subleaf) results, without trusting hardware-reported counts.
//!
//! - `source` — CPUID access: native instruction, cpuid device, simulation
//! - `tree` — ordered, insert-only result storage
//! - `walk` — vendor detection, per-leaf subleaf rules, and the driver
//! - `output` — XML and JSON renderers
//!
//! ```
//! use cpudump::source::mock::SimulatedCpuIdFactory;
//! use cpudump::walk;
//!
//! let factory = SimulatedCpuIdFactory::genuine_intel();
//! let tree = walk::dump_all(&factory);
//! assert!(!tree.processor(0).unwrap().is_empty());
//! ```

pub mod output;
pub mod source;
pub mod tree;
pub mod walk;
