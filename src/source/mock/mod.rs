//! Simulated CPUID sources for deterministic testing.
//!
//! `SimulatedCpuId` answers queries from a fixed table; the scenario
//! constructors on `SimulatedCpuIdFactory` provide realistic fixtures.

mod scenarios;
mod simulation;

pub use simulation::{SimulatedCpuId, SimulatedCpuIdFactory};
