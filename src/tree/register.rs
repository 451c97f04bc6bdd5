//! A single CPUID query result.

/// The result of one CPUID query: the input selectors, the four output
/// registers, and whether the query could be serviced at all.
///
/// An invalid register carries an all-zero quad. Sources return invalid
/// registers when the underlying mechanism failed (processor unreachable,
/// affinity change refused, device missing or unreadable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuIdRegister {
    in_eax: u32,
    in_ecx: u32,
    eax: u32,
    ebx: u32,
    ecx: u32,
    edx: u32,
    valid: bool,
}

impl CpuIdRegister {
    /// Creates a valid register from a serviced query.
    ///
    /// # Arguments
    /// * `in_eax` - The input leaf selector
    /// * `in_ecx` - The input subleaf selector
    /// * `eax`, `ebx`, `ecx`, `edx` - The output registers
    pub fn new(in_eax: u32, in_ecx: u32, eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self {
            in_eax,
            in_ecx,
            eax,
            ebx,
            ecx,
            edx,
            valid: true,
        }
    }

    /// Creates an invalid register for a query that could not be serviced.
    pub fn invalid() -> Self {
        Self {
            in_eax: 0,
            in_ecx: 0,
            eax: 0,
            ebx: 0,
            ecx: 0,
            edx: 0,
            valid: false,
        }
    }

    /// Whether the query was serviced. The quad of an invalid register is
    /// meaningless and always zero.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The input leaf selector (EAX before the query).
    pub fn in_eax(&self) -> u32 {
        self.in_eax
    }

    /// The input subleaf selector (ECX before the query).
    pub fn in_ecx(&self) -> u32 {
        self.in_ecx
    }

    /// The output EAX register.
    pub fn eax(&self) -> u32 {
        self.eax
    }

    /// The output EBX register.
    pub fn ebx(&self) -> u32 {
        self.ebx
    }

    /// The output ECX register.
    pub fn ecx(&self) -> u32 {
        self.ecx
    }

    /// The output EDX register.
    pub fn edx(&self) -> u32 {
        self.edx
    }
}
