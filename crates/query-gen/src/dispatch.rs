//! Mapping from driver request indices to query kinds.

use crate::error::GeneratorError;
use crate::kind::QueryKind;

/// Ordered, non-empty list of kinds cycled by request index.
///
/// Index `i` maps to `kinds[i % len]`, so the same table and index always
/// select the same kind. Repeating a kind in the table weights it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable {
    kinds: Vec<QueryKind>,
}

impl DispatchTable {
    pub fn new(kinds: Vec<QueryKind>) -> Result<Self, GeneratorError> {
        if kinds.is_empty() {
            return Err(GeneratorError::EmptyDispatchTable);
        }
        Ok(Self { kinds })
    }

    /// Table that always selects `kind`.
    pub fn single(kind: QueryKind) -> Self {
        Self { kinds: vec![kind] }
    }

    pub fn kind_for(&self, index: usize) -> QueryKind {
        self.kinds[index % self.kinds.len()]
    }

    pub fn kinds(&self) -> &[QueryKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
