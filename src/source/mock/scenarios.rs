//! Pre-built CPUID tables for testing the walk without hardware.
//!
//! Each scenario is a single-processor table wired up the way real firmware
//! reports it, covering the subleaf rules the walk has to interpret.

use super::simulation::SimulatedCpuIdFactory;
use crate::tree::{CpuIdProcessor, CpuIdRegister, CpuIdTree};

fn leaf(processor: &mut CpuIdProcessor, leaf: u32, subleaf: u32, quad: [u32; 4]) {
    processor
        .add_leaf(CpuIdRegister::new(
            leaf, subleaf, quad[0], quad[1], quad[2], quad[3],
        ))
        .expect("scenario leaves are distinct");
}

fn single_processor(processor: CpuIdProcessor) -> SimulatedCpuIdFactory {
    let mut tree = CpuIdTree::new();
    tree.set_processor(0, processor)
        .expect("scenario has one processor");
    SimulatedCpuIdFactory::from_tree(tree)
}

impl SimulatedCpuIdFactory {
    /// An Intel processor exercising the cache (4), feature-count (7),
    /// topology (11), and state-component (13) rules plus a plain extended
    /// region. No hypervisor bit.
    pub fn genuine_intel() -> Self {
        let mut p = CpuIdProcessor::new();
        leaf(&mut p, 0, 0, [0x0D, 0x756E_6547, 0x6C65_746E, 0x4965_6E69]);
        leaf(&mut p, 1, 0, [0x000A_0655, 0x0010_0800, 0x7FFA_FBFF, 0xBFEB_FBFF]);
        leaf(&mut p, 2, 0, [0x76F6_B5A0, 0x0000_F0B2, 0x0000_0000, 0x00C3_0000]);
        // Leaf 4: three cache levels, then a type-0 terminator subleaf.
        leaf(&mut p, 4, 0, [0x1C00_4121, 0x01C0_003F, 0x0000_003F, 0]);
        leaf(&mut p, 4, 1, [0x1C00_4122, 0x01C0_003F, 0x0000_003F, 0]);
        leaf(&mut p, 4, 2, [0x1C00_4143, 0x03C0_003F, 0x0000_03FF, 0]);
        leaf(&mut p, 4, 3, [0x1C03_C160, 0x03C0_003F, 0x0000_1FFF, 0x0000_0006]);
        leaf(&mut p, 6, 0, [0x0000_00F7, 0x0000_0002, 0x0000_0009, 0]);
        // Leaf 7: no further subleaves, SGX bit (ebx bit 2) clear.
        leaf(&mut p, 7, 0, [0, 0xF3BF_A7EB, 0x0000_0018, 0xBC00_0600]);
        // Leaf 11: SMT and core levels, then the all-zero terminator level.
        leaf(&mut p, 11, 0, [0x0000_0001, 0x0000_0002, 0x0000_0100, 0x0000_0003]);
        leaf(&mut p, 11, 1, [0x0000_0004, 0x0000_0008, 0x0000_0201, 0x0000_0003]);
        leaf(&mut p, 11, 2, [0, 0, 0x0000_0002, 0x0000_0003]);
        // Leaf 13: populated state components are non-contiguous.
        leaf(&mut p, 13, 0, [0x0000_001F, 0x0000_0440, 0x0000_0440, 0]);
        leaf(&mut p, 13, 1, [0x0000_000F, 0x0000_03C0, 0x0000_0100, 0]);
        leaf(&mut p, 13, 2, [0x0000_0100, 0x0000_0240, 0, 0]);
        leaf(&mut p, 13, 5, [0x0000_0040, 0x0000_03C0, 0, 0]);
        // Extended region: brand string and friends, subleaf 0 only.
        leaf(&mut p, 0x8000_0000, 0, [0x8000_0008, 0, 0, 0]);
        leaf(&mut p, 0x8000_0001, 0, [0, 0, 0x0000_0121, 0x2C10_0800]);
        leaf(&mut p, 0x8000_0002, 0, [0x65746E49, 0x2952286C, 0x726F4320, 0x4D542865]);
        leaf(&mut p, 0x8000_0003, 0, [0x35692029, 0x3035382D, 0x43204830, 0x40205550]);
        leaf(&mut p, 0x8000_0004, 0, [0x302E3220, 0x7A484730, 0, 0]);
        leaf(&mut p, 0x8000_0005, 0, [0, 0, 0, 0]);
        leaf(&mut p, 0x8000_0006, 0, [0, 0, 0x0100_4040, 0]);
        leaf(&mut p, 0x8000_0007, 0, [0, 0, 0, 0x0000_0100]);
        leaf(&mut p, 0x8000_0008, 0, [0x0000_3027, 0, 0, 0]);
        single_processor(p)
    }

    /// An AMD processor whose extended region reaches the cache-properties
    /// (0x8000001D) and extended-topology (0x80000026) probe rules.
    pub fn authentic_amd() -> Self {
        let mut p = CpuIdProcessor::new();
        leaf(&mut p, 0, 0, [0x0D, 0x6874_7541, 0x444D_4163, 0x6974_6E65]);
        leaf(&mut p, 1, 0, [0x00A2_0F10, 0x0010_0800, 0x7EF8_320B, 0x178B_FBFF]);
        leaf(&mut p, 7, 0, [0, 0x2191_69C1, 0x0000_0004, 0]);
        leaf(&mut p, 13, 0, [0x0000_0007, 0x0000_0340, 0x0000_0988, 0]);
        leaf(&mut p, 13, 1, [0x0000_000F, 0x0000_0348, 0x0000_1800, 0]);
        leaf(&mut p, 13, 2, [0x0000_0100, 0x0000_0240, 0, 0]);
        leaf(&mut p, 0x8000_0000, 0, [0x8000_0026, 0x6874_7541, 0x444D_4163, 0x6974_6E65]);
        leaf(&mut p, 0x8000_0001, 0, [0x00A2_0F10, 0x2000_0000, 0x75C2_37FF, 0x2FD3_FBFF]);
        leaf(&mut p, 0x8000_0008, 0, [0x0000_3030, 0x0111_1004, 0x0000_400F, 0x0001_0000]);
        // 0x8000001D: L1d, L1i, L2, L3, then the type-0 terminator.
        leaf(&mut p, 0x8000_001D, 0, [0x0000_4121, 0x01C0_003F, 0x0000_003F, 0]);
        leaf(&mut p, 0x8000_001D, 1, [0x0000_4122, 0x01C0_003F, 0x0000_003F, 0]);
        leaf(&mut p, 0x8000_001D, 2, [0x0000_8143, 0x01C0_003F, 0x0000_03FF, 0x0000_0002]);
        leaf(&mut p, 0x8000_001D, 3, [0x0003_C163, 0x03C0_003F, 0x0000_7FFF, 0x0000_0001]);
        leaf(&mut p, 0x8000_001D, 4, [0, 0, 0, 0]);
        // 0x80000026: level type lives in ecx bits 15:8; zero terminates.
        leaf(&mut p, 0x8000_0026, 0, [0x0000_0001, 0x0000_0002, 0x0000_0100, 0]);
        leaf(&mut p, 0x8000_0026, 1, [0x0000_0004, 0x0000_0010, 0x0000_0201, 0]);
        leaf(&mut p, 0x8000_0026, 2, [0, 0, 0x0000_0002, 0]);
        single_processor(p)
    }

    /// A guest processor with the hypervisor-present bit set in leaf 1 and a
    /// two-leaf hypervisor region at 0x40000000.
    pub fn hypervisor_guest() -> Self {
        let mut p = CpuIdProcessor::new();
        leaf(&mut p, 0, 0, [0x01, 0x756E_6547, 0x6C65_746E, 0x4965_6E69]);
        leaf(&mut p, 1, 0, [0x000A_0655, 0x0010_0800, 0xFFFA_FBFF, 0xBFEB_FBFF]);
        leaf(&mut p, 0x4000_0000, 0, [0x4000_0001, 0x4B4D_564B, 0x564B_4D56, 0x0000_004D]);
        leaf(&mut p, 0x4000_0001, 0, [0x0100_41FD, 0, 0, 0]);
        single_processor(p)
    }

    /// A processor whose vendor signature matches neither supported vendor,
    /// so only the plain region walk applies.
    pub fn unknown_vendor() -> Self {
        let mut p = CpuIdProcessor::new();
        leaf(&mut p, 0, 0, [0x02, 0x2020_2020, 0x2020_2020, 0x2020_2020]);
        leaf(&mut p, 1, 0, [0x0000_0651, 0, 0, 0x0000_0001]);
        leaf(&mut p, 2, 0, [0x0000_0001, 0, 0, 0]);
        single_processor(p)
    }
}
