//! The per-processor enumeration walk.
//!
//! Starting from the base leaf, the walk discovers every valid (leaf,
//! subleaf) pair the processor exposes. Reported counts are never trusted
//! blindly: every loop whose bound comes from hardware data is clamped to an
//! absolute cap, so corrupted or hostile firmware degrades the result
//! instead of hanging the walk.

use tracing::{debug, error};

use crate::source::CpuIdSource;
use crate::tree::{CpuIdProcessor, CpuIdRegister};
use crate::walk::rules::{self, RegField, SubleafRule};
use crate::walk::vendor::{self, CpuVendor};

/// Highest standard leaf probed regardless of the reported count.
const STANDARD_LEAF_CAP: u32 = 0xFFFF;
/// Base of the extended leaf region.
const EXTENDED_REGION: u32 = 0x8000_0000;
/// Highest extended leaf probed regardless of the reported count.
const EXTENDED_LEAF_CAP: u32 = 0x8000_FFFF;
/// Base of the hypervisor leaf region, present only when leaf 1 says so.
const HYPERVISOR_REGION: u32 = 0x4000_0000;
/// Highest subleaf any probe or count loop reaches.
const SUBLEAF_CAP: u32 = 0xFF;
/// Leaf 13 covers one state component per bit of a 64-bit mask.
const STATE_COMPONENT_MAX: u32 = 63;

/// Cross-leaf state threaded through the standard walk. Leaf 7 reports
/// whether SGX is present; leaf 18's section probe consumes it.
#[derive(Debug, Default)]
struct WalkContext {
    sgx: bool,
}

/// Enumerates every valid leaf of one logical processor.
///
/// An invalid base query leaves the store empty and ends the walk; any
/// other invalid query only omits that one entry. Duplicate keys cannot
/// come from hardware, only from overlapping rules, and are reported and
/// rejected without stopping the walk.
pub fn enumerate_processor(source: &dyn CpuIdSource) -> CpuIdProcessor {
    let mut processor = CpuIdProcessor::new();

    let base = source.query(0, 0);
    if !base.is_valid() {
        return processor;
    }
    record(&mut processor, base);

    match vendor::detect(&base) {
        CpuVendor::Intel | CpuVendor::Amd => {
            walk_standard(source, &mut processor);
            walk_extended(source, &mut processor);
            walk_hypervisor(source, &mut processor);
        }
        CpuVendor::Unknown => walk_unknown(source, &mut processor),
    }

    processor
}

/// Records a valid result, reporting (and rejecting) duplicate keys.
fn record(processor: &mut CpuIdProcessor, reg: CpuIdRegister) {
    if !reg.is_valid() {
        debug!(
            "query {:08X}h/{:X}h not serviced, entry omitted",
            reg.in_eax(),
            reg.in_ecx()
        );
        return;
    }

    if let Err(err) = processor.add_leaf(reg) {
        // Overlapping subleaf rules; a walk defect, not a hardware state.
        error!("internal fault: {err}");
    }
}

/// Standard leaves 1..=`leaf 0 EAX`, interpreting the per-leaf rules.
fn walk_standard(source: &dyn CpuIdSource, processor: &mut CpuIdProcessor) {
    let Some(base) = processor.get_leaf(0, 0) else {
        return;
    };
    let leafs = base.eax().min(STANDARD_LEAF_CAP);
    let mut ctx = WalkContext::default();

    for leaf in 1..=leafs {
        match rules::standard_rule(leaf) {
            SubleafRule::Single => record(processor, source.query(leaf, 0)),
            SubleafRule::ProbeWhile { field, mask } => {
                probe_while(source, processor, leaf, field, mask);
            }
            SubleafRule::CountInEax => count_in_eax(source, processor, leaf, &mut ctx),
            SubleafRule::Fixed(count) => {
                for subleaf in 0..count {
                    record(processor, source.query(leaf, subleaf));
                }
            }
            SubleafRule::StateComponents => state_components(source, processor, leaf),
            SubleafRule::ResidualBitmap => residual_bitmap(source, processor, leaf),
            SubleafRule::SgxSections => sgx_sections(source, processor, leaf, &ctx),
        }
    }
}

/// Queries subleaf 0 and keeps probing while `field & mask` of the last
/// result is nonzero. An invalid result has a zero quad, so it terminates
/// the probe naturally.
fn probe_while(
    source: &dyn CpuIdSource,
    processor: &mut CpuIdProcessor,
    leaf: u32,
    field: RegField,
    mask: u32,
) {
    let mut subleaf = 0;
    loop {
        let reg = source.query(leaf, subleaf);
        record(processor, reg);
        if field.extract(&reg) & mask == 0 || subleaf >= SUBLEAF_CAP {
            break;
        }
        subleaf += 1;
    }
}

/// Subleaf 0's EAX counts the additional subleaves. Leaf 7 also publishes
/// the SGX bit consumed later by leaf 18.
fn count_in_eax(
    source: &dyn CpuIdSource,
    processor: &mut CpuIdProcessor,
    leaf: u32,
    ctx: &mut WalkContext,
) {
    let first = source.query(leaf, 0);
    record(processor, first);
    if leaf == 7 {
        ctx.sgx = first.ebx() & 0x0000_0004 != 0;
    }

    let count = first.eax().min(SUBLEAF_CAP);
    for subleaf in 1..=count {
        record(processor, source.query(leaf, subleaf));
    }
}

/// Leaf 13: the populated state components are non-contiguous, so the whole
/// 0..=63 range is queried and all-zero results past subleaf 2 are dropped.
fn state_components(source: &dyn CpuIdSource, processor: &mut CpuIdProcessor, leaf: u32) {
    for subleaf in 0..=STATE_COMPONENT_MAX {
        let reg = source.query(leaf, subleaf);
        if !reg.is_valid() {
            continue;
        }
        let populated = (reg.eax() | reg.ebx() | reg.ecx() | reg.edx()) != 0;
        if subleaf <= 2 || populated {
            record(processor, reg);
        }
    }
}

/// Leaf 16: EBX of subleaf 0, shifted right once, is a bitmap with one bit
/// per remaining subleaf. Self-terminating within 31 iterations.
fn residual_bitmap(source: &dyn CpuIdSource, processor: &mut CpuIdProcessor, leaf: u32) {
    let first = source.query(leaf, 0);
    record(processor, first);

    let mut residual = first.ebx() >> 1;
    let mut subleaf = 1;
    while residual != 0 {
        record(processor, source.query(leaf, subleaf));
        residual >>= 1;
        subleaf += 1;
    }
}

/// Leaf 18: subleaves 0 and 1 always exist; section subleaves from 2 on are
/// probed only when leaf 7 reported SGX, until EAX's low nibble goes zero.
fn sgx_sections(
    source: &dyn CpuIdSource,
    processor: &mut CpuIdProcessor,
    leaf: u32,
    ctx: &WalkContext,
) {
    record(processor, source.query(leaf, 0));
    record(processor, source.query(leaf, 1));

    if !ctx.sgx {
        return;
    }
    let mut subleaf = 2;
    loop {
        let reg = source.query(leaf, subleaf);
        record(processor, reg);
        if reg.eax() & 0x0000_000F == 0 || subleaf >= SUBLEAF_CAP {
            break;
        }
        subleaf += 1;
    }
}

/// Extended leaves 0x80000001..=`0x80000000 EAX`, with the AMD cache and
/// topology probe overrides.
fn walk_extended(source: &dyn CpuIdSource, processor: &mut CpuIdProcessor) {
    let first = source.query(EXTENDED_REGION, 0);
    if !first.is_valid() {
        return;
    }
    let leafs = first.eax().min(EXTENDED_LEAF_CAP);
    record(processor, first);

    for leaf in EXTENDED_REGION + 1..=leafs {
        match rules::extended_rule(leaf) {
            SubleafRule::ProbeWhile { field, mask } => {
                probe_while(source, processor, leaf, field, mask);
            }
            _ => record(processor, source.query(leaf, 0)),
        }
    }
}

/// Hypervisor region at 0x40000000, present only when the stored leaf 1
/// result has ECX bit 31 set.
fn walk_hypervisor(source: &dyn CpuIdSource, processor: &mut CpuIdProcessor) {
    let Some(reg1) = processor.get_leaf(1, 0) else {
        return;
    };
    if reg1.ecx() & 0x8000_0000 == 0 {
        return;
    }
    walk_region(source, processor, HYPERVISOR_REGION);
}

/// Subleaf-0 walk over one region. The region's base EAX reports the
/// highest supported leaf as an absolute number; it is clamped to the
/// region's 16-bit ceiling to guard against corrupted counts.
fn walk_region(source: &dyn CpuIdSource, processor: &mut CpuIdProcessor, region: u32) {
    let first = source.query(region, 0);
    if !first.is_valid() {
        return;
    }
    let leafs = first.eax().min(region | 0xFFFF);
    record(processor, first);

    for leaf in region + 1..=leafs {
        record(processor, source.query(leaf, 0));
    }
}

/// Unknown-vendor walk: subleaf 0 of every leaf up to the already-recorded
/// base count, with none of the vendor-specific rules.
fn walk_unknown(source: &dyn CpuIdSource, processor: &mut CpuIdProcessor) {
    let Some(base) = processor.get_leaf(0, 0) else {
        return;
    };
    let leafs = base.eax();

    for leaf in 1..=leafs {
        record(processor, source.query(leaf, 0));
    }
}
