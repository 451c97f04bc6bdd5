//! Ordered leaf storage for one logical processor.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::tree::CpuIdRegister;

/// Error returned when inserting a (leaf, subleaf) key that is already
/// present.
///
/// The walk never queries the same selector pair twice, so a duplicate can
/// only come from two subleaf rules overlapping in key space. Callers must
/// report it rather than overwrite; overwriting would hide the defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateLeaf {
    /// The leaf selector of the rejected insert.
    pub leaf: u32,
    /// The subleaf selector of the rejected insert.
    pub subleaf: u32,
}

impl std::fmt::Display for DuplicateLeaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "leaf {:08X}h subleaf {:08X}h already recorded",
            self.leaf, self.subleaf
        )
    }
}

impl std::error::Error for DuplicateLeaf {}

/// The set of CPUID results for one logical processor, ordered by
/// ascending (leaf, subleaf).
///
/// Inserts are rejected for keys already present — see [`DuplicateLeaf`].
/// A processor that was present but unreachable keeps an empty store.
#[derive(Debug, Clone, Default)]
pub struct CpuIdProcessor {
    leaves: BTreeMap<(u32, u32), CpuIdRegister>,
}

impl CpuIdProcessor {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the result recorded for `(leaf, subleaf)`.
    pub fn get_leaf(&self, leaf: u32, subleaf: u32) -> Option<&CpuIdRegister> {
        self.leaves.get(&(leaf, subleaf))
    }

    /// Records a query result under its own input selectors.
    ///
    /// # Errors
    /// Returns [`DuplicateLeaf`] if the key is already present; the existing
    /// entry is left untouched.
    pub fn add_leaf(&mut self, reg: CpuIdRegister) -> Result<(), DuplicateLeaf> {
        match self.leaves.entry((reg.in_eax(), reg.in_ecx())) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(reg);
                Ok(())
            }
            btree_map::Entry::Occupied(_) => Err(DuplicateLeaf {
                leaf: reg.in_eax(),
                subleaf: reg.in_ecx(),
            }),
        }
    }

    /// Number of recorded leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether no leaf was recorded (unreachable processor).
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Iterates recorded results in ascending (leaf, subleaf) order.
    pub fn iter(&self) -> impl Iterator<Item = (&(u32, u32), &CpuIdRegister)> {
        self.leaves.iter()
    }
}

impl<'a> IntoIterator for &'a CpuIdProcessor {
    type Item = (&'a (u32, u32), &'a CpuIdRegister);
    type IntoIter = btree_map::Iter<'a, (u32, u32), CpuIdRegister>;

    fn into_iter(self) -> Self::IntoIter {
        self.leaves.iter()
    }
}
