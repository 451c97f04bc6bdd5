//! Simulated CPUID source answering from a fixed leaf table.

use std::sync::Arc;

use crate::source::{CpuIdFactory, CpuIdSource};
use crate::tree::{CpuIdRegister, CpuIdTree};

/// Answers queries out of a pre-built [`CpuIdTree`].
///
/// Any (leaf, subleaf) pair present in the table for this source's processor
/// is returned as recorded; everything else reports invalid, which is what
/// real hardware access does for an unreachable selector.
pub struct SimulatedCpuId {
    cpu: u32,
    tree: Arc<CpuIdTree>,
}

impl SimulatedCpuId {
    /// Creates a source for `cpu` backed by the shared table.
    pub fn new(cpu: u32, tree: Arc<CpuIdTree>) -> Self {
        Self { cpu, tree }
    }
}

impl CpuIdSource for SimulatedCpuId {
    fn query(&self, leaf: u32, subleaf: u32) -> CpuIdRegister {
        let Some(processor) = self.tree.processor(self.cpu) else {
            return CpuIdRegister::invalid();
        };

        match processor.get_leaf(leaf, subleaf) {
            Some(reg) => *reg,
            None => CpuIdRegister::invalid(),
        }
    }
}

/// Factory handing out [`SimulatedCpuId`] sources over one shared table.
#[derive(Clone)]
pub struct SimulatedCpuIdFactory {
    tree: Arc<CpuIdTree>,
}

impl SimulatedCpuIdFactory {
    /// Wraps a pre-built table.
    pub fn from_tree(tree: CpuIdTree) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }
}

impl CpuIdFactory for SimulatedCpuIdFactory {
    fn processor_count(&self) -> u32 {
        self.tree.len() as u32
    }

    fn create(&self, cpu: u32) -> Option<Box<dyn CpuIdSource>> {
        Some(Box::new(SimulatedCpuId::new(cpu, Arc::clone(&self.tree))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CpuIdProcessor;

    #[test]
    fn test_answers_from_table() {
        let mut processor = CpuIdProcessor::new();
        processor
            .add_leaf(CpuIdRegister::new(0, 0, 0x0D, 0x1234, 0x5678, 0x9ABC))
            .unwrap();
        let mut tree = CpuIdTree::new();
        tree.set_processor(0, processor).unwrap();

        let factory = SimulatedCpuIdFactory::from_tree(tree);
        assert_eq!(factory.processor_count(), 1);

        let source = factory.create(0).unwrap();
        let reg = source.query(0, 0);
        assert!(reg.is_valid());
        assert_eq!(reg.ebx(), 0x1234);

        // Absent selector and absent processor both report invalid.
        assert!(!source.query(1, 0).is_valid());
        assert!(!factory.create(7).unwrap().query(0, 0).is_valid());
    }
}
