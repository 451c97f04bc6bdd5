//! Vendor identification from the base leaf.

use crate::tree::CpuIdRegister;

// The 12-byte vendor string is laid out across ebx, edx, ecx in that
// hardware-defined order. Deriving the words from the ASCII bytes keeps the
// encoding honest.
const INTEL_EBX: u32 = u32::from_le_bytes(*b"Genu");
const INTEL_EDX: u32 = u32::from_le_bytes(*b"ineI");
const INTEL_ECX: u32 = u32::from_le_bytes(*b"ntel");

const AMD_EBX: u32 = u32::from_le_bytes(*b"Auth");
const AMD_EDX: u32 = u32::from_le_bytes(*b"enti");
const AMD_ECX: u32 = u32::from_le_bytes(*b"cAMD");

/// Processor vendor as reported by leaf 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuVendor {
    /// "GenuineIntel"
    Intel,
    /// "AuthenticAMD"
    Amd,
    /// Any other signature. Only the plain region walk applies.
    Unknown,
}

/// Matches the (leaf 0, subleaf 0) signature registers against the known
/// vendor strings.
pub fn detect(base: &CpuIdRegister) -> CpuVendor {
    if base.ebx() == INTEL_EBX && base.edx() == INTEL_EDX && base.ecx() == INTEL_ECX {
        CpuVendor::Intel
    } else if base.ebx() == AMD_EBX && base.edx() == AMD_EDX && base.ecx() == AMD_ECX {
        CpuVendor::Amd
    } else {
        CpuVendor::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intel_signature() {
        let base = CpuIdRegister::new(0, 0, 0x16, 0x756E_6547, 0x6C65_746E, 0x4965_6E69);
        assert_eq!(detect(&base), CpuVendor::Intel);
    }

    #[test]
    fn test_amd_signature() {
        let base = CpuIdRegister::new(0, 0, 0x10, 0x6874_7541, 0x444D_4163, 0x6974_6E65);
        assert_eq!(detect(&base), CpuVendor::Amd);
    }

    #[test]
    fn test_unmatched_signature_is_unknown() {
        let base = CpuIdRegister::new(0, 0, 0x10, 0x6874_7541, 0x444D_4163, 0x444D_4163);
        assert_eq!(detect(&base), CpuVendor::Unknown);

        let base = CpuIdRegister::new(0, 0, 0x02, 0, 0, 0);
        assert_eq!(detect(&base), CpuVendor::Unknown);
    }
}
