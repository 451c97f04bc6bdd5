//! CPUID via direct instruction execution, pinned to the target processor.
//!
//! The CPUID instruction reports values for whichever logical processor the
//! calling thread happens to run on, so every query pins the thread to the
//! target processor for its duration. The previous affinity mask is restored
//! on every exit path, including early failure.

use std::mem;

use crate::source::{CpuIdFactory, CpuIdSource};
use crate::tree::CpuIdRegister;

/// Scoped thread-affinity pin. Restores the saved mask on drop.
struct AffinityGuard {
    previous: libc::cpu_set_t,
}

impl AffinityGuard {
    /// Pins the calling thread to `cpu`. Returns `None` when the current
    /// mask cannot be read or the new mask cannot be applied; in the latter
    /// case nothing was changed, so there is nothing to restore.
    fn pin(cpu: u32) -> Option<Self> {
        // SAFETY: cpu_set_t is a plain bitmask; zeroed is a valid empty set.
        // The syscalls only read/write the sets we pass.
        unsafe {
            let mut previous: libc::cpu_set_t = mem::zeroed();
            if libc::sched_getaffinity(0, mem::size_of::<libc::cpu_set_t>(), &mut previous) != 0 {
                return None;
            }

            let mut target: libc::cpu_set_t = mem::zeroed();
            libc::CPU_ZERO(&mut target);
            libc::CPU_SET(cpu as usize, &mut target);
            if libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), &target) != 0 {
                return None;
            }

            Some(Self { previous })
        }
    }
}

impl Drop for AffinityGuard {
    fn drop(&mut self) {
        // SAFETY: restores the mask captured in pin().
        unsafe {
            libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), &self.previous);
        }
    }
}

/// Executes the CPUID instruction on one logical processor.
pub struct NativeCpuId {
    cpu: u32,
}

impl NativeCpuId {
    /// Creates a source for the given processor index.
    pub fn new(cpu: u32) -> Self {
        Self { cpu }
    }
}

impl CpuIdSource for NativeCpuId {
    fn query(&self, leaf: u32, subleaf: u32) -> CpuIdRegister {
        let Some(_guard) = AffinityGuard::pin(self.cpu) else {
            // Couldn't reach the processor; report the query as unserviced.
            return CpuIdRegister::invalid();
        };

        let result = core::arch::x86_64::__cpuid_count(leaf, subleaf);
        CpuIdRegister::new(leaf, subleaf, result.eax, result.ebx, result.ecx, result.edx)
    }
}

/// Factory producing [`NativeCpuId`] sources, one per OS-visible processor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeCpuIdFactory;

impl NativeCpuIdFactory {
    /// Creates the factory.
    pub fn new() -> Self {
        Self
    }
}

impl CpuIdFactory for NativeCpuIdFactory {
    fn processor_count(&self) -> u32 {
        std::thread::available_parallelism()
            .map(|count| count.get() as u32)
            .unwrap_or(1)
    }

    fn create(&self, cpu: u32) -> Option<Box<dyn CpuIdSource>> {
        Some(Box::new(NativeCpuId::new(cpu)))
    }
}
