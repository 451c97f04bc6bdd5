//! CPUID enumeration: vendor detection, the per-leaf walk, and the driver.
//!
//! For each processor the walk queries (0, 0), detects the vendor, and then
//! runs the applicable sub-walks in order: standard leaves with their
//! per-leaf subleaf rules, the extended region at 0x80000000, and the
//! hypervisor region at 0x40000000 when leaf 1 advertises one. Unknown
//! vendors get a plain subleaf-0 walk with no special cases.
//!
//! Processors are handled strictly sequentially. The native source repins
//! thread affinity per query, and repinning from concurrent walks would
//! race, so there is deliberately no parallelism here.

mod engine;
mod rules;
pub mod vendor;

pub use engine::enumerate_processor;

use tracing::{debug, error, warn};

use crate::source::CpuIdFactory;
use crate::tree::{CpuIdProcessor, CpuIdTree};

/// Enumerates every logical processor the factory reports.
///
/// One store per processor index, always: unreachable processors (source
/// creation failure or an unserviced base query) are entered with an empty
/// store and never abort the rest of the run.
pub fn dump_all(factory: &dyn CpuIdFactory) -> CpuIdTree {
    let mut tree = CpuIdTree::new();

    for cpu in 0..factory.processor_count() {
        let processor = match factory.create(cpu) {
            Some(source) => enumerate_processor(source.as_ref()),
            None => {
                warn!("processor {cpu}: source unavailable");
                CpuIdProcessor::new()
            }
        };

        if processor.is_empty() {
            warn!("processor {cpu}: no leaves recorded");
        } else {
            debug!("processor {cpu}: {} leaves recorded", processor.len());
        }

        if let Err(err) = tree.set_processor(cpu, processor) {
            error!("internal fault: {err}");
        }
    }

    tree
}
