use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for objects stored in an arena.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// Returns `None` only for `u32::MAX`, which cannot be shifted by one.
    pub fn from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Create an Id from a `usize` arena position.
    pub fn from_usize(index: usize) -> Option<Self> {
        u32::try_from(index).ok().and_then(Self::from_index)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Recover the 0-based index as an arena position.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Material graph node identifier.
pub type NodeId = Id;
