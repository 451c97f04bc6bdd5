//! The full enumeration result: one leaf store per logical processor.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::tree::CpuIdProcessor;

/// Error returned when a processor index is inserted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateProcessor {
    /// The rejected processor index.
    pub cpu: u32,
}

impl std::fmt::Display for DuplicateProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "processor {} already recorded", self.cpu)
    }
}

impl std::error::Error for DuplicateProcessor {}

/// Maps processor index to its [`CpuIdProcessor`], in ascending index order.
///
/// Insert-only: the driver sets each processor exactly once, including an
/// empty store for processors that could not be reached.
#[derive(Debug, Clone, Default)]
pub struct CpuIdTree {
    processors: BTreeMap<u32, CpuIdProcessor>,
}

impl CpuIdTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the store for a processor index.
    pub fn processor(&self, cpu: u32) -> Option<&CpuIdProcessor> {
        self.processors.get(&cpu)
    }

    /// Inserts the store for a processor index.
    ///
    /// # Errors
    /// Returns [`DuplicateProcessor`] if the index was already set; the
    /// existing store is left untouched.
    pub fn set_processor(
        &mut self,
        cpu: u32,
        processor: CpuIdProcessor,
    ) -> Result<(), DuplicateProcessor> {
        match self.processors.entry(cpu) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(processor);
                Ok(())
            }
            btree_map::Entry::Occupied(_) => Err(DuplicateProcessor { cpu }),
        }
    }

    /// Number of processors recorded.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether no processor was recorded.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Iterates (processor index, store) in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (&u32, &CpuIdProcessor)> {
        self.processors.iter()
    }
}

impl<'a> IntoIterator for &'a CpuIdTree {
    type Item = (&'a u32, &'a CpuIdProcessor);
    type IntoIter = btree_map::Iter<'a, u32, CpuIdProcessor>;

    fn into_iter(self) -> Self::IntoIter {
        self.processors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CpuIdRegister;

    #[test]
    fn test_set_and_get() {
        let mut tree = CpuIdTree::new();
        let mut processor = CpuIdProcessor::new();
        processor
            .add_leaf(CpuIdRegister::new(0, 0, 0x16, 0, 0, 0))
            .unwrap();

        tree.set_processor(0, processor).unwrap();
        tree.set_processor(1, CpuIdProcessor::new()).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.processor(0).unwrap().len(), 1);
        assert!(tree.processor(1).unwrap().is_empty());
        assert!(tree.processor(2).is_none());
    }

    #[test]
    fn test_duplicate_processor_rejected() {
        let mut tree = CpuIdTree::new();
        let mut filled = CpuIdProcessor::new();
        filled
            .add_leaf(CpuIdRegister::new(0, 0, 1, 0, 0, 0))
            .unwrap();

        tree.set_processor(3, filled).unwrap();
        let err = tree.set_processor(3, CpuIdProcessor::new()).unwrap_err();
        assert_eq!(err, DuplicateProcessor { cpu: 3 });
        assert_eq!(tree.processor(3).unwrap().len(), 1);
    }

    #[test]
    fn test_iteration_order() {
        let mut tree = CpuIdTree::new();
        for cpu in [5, 0, 3] {
            tree.set_processor(cpu, CpuIdProcessor::new()).unwrap();
        }

        let order: Vec<u32> = tree.iter().map(|(&cpu, _)| cpu).collect();
        assert_eq!(order, vec![0, 3, 5]);
    }
}
