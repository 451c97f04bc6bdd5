//! Abstractions for CPUID access to enable testing and mocking.
//!
//! The `CpuIdSource` trait lets the walk run against the real instruction,
//! the kernel's cpuid device, or a simulated leaf table for deterministic
//! tests.

use crate::tree::CpuIdRegister;

/// One logical processor's CPUID query mechanism.
///
/// A source is bound to a single processor for its whole lifetime. Queries
/// are synchronous and never fail; an unserviceable query is communicated
/// through [`CpuIdRegister::is_valid`].
pub trait CpuIdSource {
    /// Issues one CPUID query for the given leaf and subleaf.
    fn query(&self, leaf: u32, subleaf: u32) -> CpuIdRegister;
}

/// Creates [`CpuIdSource`] instances per logical processor.
pub trait CpuIdFactory {
    /// Number of logical processors to enumerate.
    fn processor_count(&self) -> u32;

    /// Creates a source bound to `cpu`.
    ///
    /// Returns `None` when the processor cannot be reached at all; the
    /// caller records an empty leaf store and moves on.
    fn create(&self, cpu: u32) -> Option<Box<dyn CpuIdSource>>;
}
