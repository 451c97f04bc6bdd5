//! Per-leaf subleaf generation rules.
//!
//! Most leaves have a single subleaf, but a handful encode how many
//! subleaves exist in bespoke ways: a count in a register, a field that goes
//! zero past the last entry, a residual bitmap, or a fixed range. Keeping
//! the rules as a lookup keeps them testable independently of the walk.

use crate::tree::CpuIdRegister;

/// Which result register a probe predicate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegField {
    Eax,
    Ebx,
    Ecx,
}

impl RegField {
    pub(crate) fn extract(self, reg: &CpuIdRegister) -> u32 {
        match self {
            RegField::Eax => reg.eax(),
            RegField::Ebx => reg.ebx(),
            RegField::Ecx => reg.ecx(),
        }
    }
}

/// How the walk generates subleaves for one leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubleafRule {
    /// Subleaf 0 only.
    Single,
    /// Query subleaf 0 and keep probing while `field & mask` of the last
    /// result is nonzero. Leaves 4 (cache type), 11/31 (topology width),
    /// 0x8000001D (cache type), 0x80000026 (level type).
    ProbeWhile { field: RegField, mask: u32 },
    /// Subleaf 0's EAX is the number of additional subleaves (1..=n).
    /// Leaves 7, 20, 23, 24, 32.
    CountInEax,
    /// Exactly this many subleaves, independent of the results. Leaf 15.
    Fixed(u32),
    /// Leaf 13: query subleaves 0..=63; the populated state components are
    /// non-contiguous, so all-zero results past subleaf 2 are filtered out
    /// rather than treated as a stop.
    StateComponents,
    /// Leaf 16: subleaf 0's EBX shifted right once is a bitmap with one bit
    /// per further subleaf.
    ResidualBitmap,
    /// Leaf 18: subleaves 0 and 1 always; sections from 2 on are probed only
    /// when leaf 7 reported SGX, while EAX's low nibble is nonzero.
    SgxSections,
}

/// Rule for a leaf in the standard range.
pub(crate) fn standard_rule(leaf: u32) -> SubleafRule {
    match leaf {
        4 => SubleafRule::ProbeWhile {
            field: RegField::Eax,
            mask: 0x0000_001F,
        },
        7 | 20 | 23 | 24 | 32 => SubleafRule::CountInEax,
        11 | 31 => SubleafRule::ProbeWhile {
            field: RegField::Ebx,
            mask: 0x0000_FFFF,
        },
        13 => SubleafRule::StateComponents,
        15 => SubleafRule::Fixed(2),
        16 => SubleafRule::ResidualBitmap,
        18 => SubleafRule::SgxSections,
        _ => SubleafRule::Single,
    }
}

/// Rule for a leaf in the extended range.
pub(crate) fn extended_rule(leaf: u32) -> SubleafRule {
    match leaf {
        0x8000_001D => SubleafRule::ProbeWhile {
            field: RegField::Eax,
            mask: 0x0000_000F,
        },
        0x8000_0026 => SubleafRule::ProbeWhile {
            field: RegField::Ecx,
            mask: 0x0000_FF00,
        },
        _ => SubleafRule::Single,
    }
}
