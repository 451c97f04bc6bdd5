//! CPUID via the kernel's `/dev/cpu/<n>/cpuid` device.
//!
//! The device encodes the query in the read offset: leaf in the low 32 bits,
//! subleaf in the high 32 bits. A serviced query yields 16 bytes holding
//! eax, ebx, ecx, edx as little-endian words. Requires the `cpuid` kernel
//! module and usually root.

use std::fs::File;
use std::os::unix::fs::FileExt;
use std::path::Path;

use crate::source::{CpuIdFactory, CpuIdSource};
use crate::tree::CpuIdRegister;

/// Reads CPUID results from one processor's cpuid device.
pub struct DeviceCpuId {
    device: Option<File>,
}

impl DeviceCpuId {
    /// Opens the device for the given processor index.
    ///
    /// A missing or unopenable device (processor absent, module not loaded,
    /// insufficient permissions) is not an error here; every subsequent
    /// query simply reports invalid.
    pub fn open(cpu: u32) -> Self {
        Self::open_path(format!("/dev/cpu/{cpu}/cpuid"))
    }

    /// Opens an explicit device path. Used by tests to point the source at
    /// a regular file.
    pub fn open_path(path: impl AsRef<Path>) -> Self {
        Self {
            device: File::open(path).ok(),
        }
    }
}

impl CpuIdSource for DeviceCpuId {
    fn query(&self, leaf: u32, subleaf: u32) -> CpuIdRegister {
        let Some(device) = &self.device else {
            return CpuIdRegister::invalid();
        };

        let offset = u64::from(leaf) | (u64::from(subleaf) << 32);
        let mut buffer = [0u8; 16];
        if device.read_exact_at(&mut buffer, offset).is_err() {
            return CpuIdRegister::invalid();
        }

        let word = |idx: usize| {
            u32::from_le_bytes([
                buffer[idx],
                buffer[idx + 1],
                buffer[idx + 2],
                buffer[idx + 3],
            ])
        };
        CpuIdRegister::new(leaf, subleaf, word(0), word(4), word(8), word(12))
    }
}

/// Factory producing [`DeviceCpuId`] sources, one per OS-visible processor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceCpuIdFactory;

impl DeviceCpuIdFactory {
    /// Creates the factory.
    pub fn new() -> Self {
        Self
    }
}

impl CpuIdFactory for DeviceCpuIdFactory {
    fn processor_count(&self) -> u32 {
        std::thread::available_parallelism()
            .map(|count| count.get() as u32)
            .unwrap_or(1)
    }

    fn create(&self, cpu: u32) -> Option<Box<dyn CpuIdSource>> {
        Some(Box::new(DeviceCpuId::open(cpu)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decodes_little_endian_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut data = Vec::new();
        for word in [0x16u32, 0x756E_6547, 0x6C65_746E, 0x4965_6E69] {
            data.extend_from_slice(&word.to_le_bytes());
        }
        file.write_all(&data).unwrap();

        let source = DeviceCpuId::open_path(file.path());
        let reg = source.query(0, 0);
        assert!(reg.is_valid());
        assert_eq!(reg.eax(), 0x16);
        assert_eq!(reg.ebx(), 0x756E_6547);
        assert_eq!(reg.ecx(), 0x6C65_746E);
        assert_eq!(reg.edx(), 0x4965_6E69);
    }

    #[test]
    fn test_reads_at_leaf_offset() {
        // The read offset is the leaf number itself, so leaf 4's 16 bytes
        // start at byte 4.
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut data = vec![0u8; 4];
        for word in [0x1C00_4121u32, 0x01C0_003F, 0x0000_003F, 0x0000_0006] {
            data.extend_from_slice(&word.to_le_bytes());
        }
        file.write_all(&data).unwrap();

        let source = DeviceCpuId::open_path(file.path());
        let reg = source.query(4, 0);
        assert!(reg.is_valid());
        assert_eq!(reg.eax(), 0x1C00_4121);
        assert_eq!(reg.edx(), 0x0000_0006);
    }

    #[test]
    fn test_short_read_is_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 20]).unwrap();

        let source = DeviceCpuId::open_path(file.path());
        // Leaf 8 needs bytes 8..24 but the file ends at byte 20.
        assert!(!source.query(8, 0).is_valid());
        // A nonzero subleaf moves the offset past 4 GiB.
        assert!(!source.query(0, 1).is_valid());
        // Leaves whose window fits are still serviced.
        assert!(source.query(4, 0).is_valid());
    }

    #[test]
    fn test_missing_device_is_invalid() {
        let source = DeviceCpuId::open_path("/nonexistent/cpu/999/cpuid");
        assert!(!source.query(0, 0).is_valid());
    }
}
