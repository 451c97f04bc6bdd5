//! CPUID access for one logical processor at a time.
//!
//! The walk only ever talks to the [`CpuIdSource`] and [`CpuIdFactory`]
//! traits, so the same engine runs against the real instruction, the
//! kernel's cpuid device, or a simulated table:
//!
//! ```text
//!                  ┌─────────────┐
//!                  │ CpuIdSource │ (trait)
//!                  └──────┬──────┘
//!          ┌──────────────┼──────────────────┐
//!          │              │                  │
//!   ┌──────▼──────┐ ┌─────▼───────┐ ┌────────▼───────┐
//!   │ NativeCpuId │ │ DeviceCpuId │ │ SimulatedCpuId │
//!   │ (cpuid insn │ │ (/dev/cpu/  │ │ (fixed table,  │
//!   │  + pinning) │ │  n/cpuid)   │ │  tests)        │
//!   └─────────────┘ └─────────────┘ └────────────────┘
//! ```

#[cfg(target_os = "linux")]
mod device;
pub mod mock;
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
mod native;
mod traits;

#[cfg(target_os = "linux")]
pub use device::{DeviceCpuId, DeviceCpuIdFactory};
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
pub use native::{NativeCpuId, NativeCpuIdFactory};
pub use traits::{CpuIdFactory, CpuIdSource};
