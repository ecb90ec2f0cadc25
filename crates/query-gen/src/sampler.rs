//! Random entity subsets.
//!
//! Entities (homes, devices, ...) are numbered `0..scale`. A query samples a
//! subset without replacement and formats each index into the identifier the
//! dataset uses.

use rand::seq::index;
use rand::Rng;

/// Maps an entity index to the identifier stored in the dataset.
pub trait EntityFormatter: Send + Sync {
    fn format(&self, index: usize) -> String;
}

impl<F> EntityFormatter for F
where
    F: Fn(usize) -> String + Send + Sync,
{
    fn format(&self, index: usize) -> String {
        self(index)
    }
}

/// Formatter that substitutes `{index}` in a pattern, e.g. `home_{index}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    pattern: String,
}

impl PatternFormatter {
    pub const DEFAULT_PATTERN: &'static str = "home_{index}";

    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATTERN)
    }
}

impl EntityFormatter for PatternFormatter {
    fn format(&self, index: usize) -> String {
        self.pattern.replace("{index}", &index.to_string())
    }
}

/// Draw `count` distinct indices uniformly from `0..universe`.
///
/// # Panics
///
/// Panics if `count > universe`.
pub fn sample_entities<R: Rng>(rng: &mut R, universe: usize, count: usize) -> Vec<usize> {
    assert!(
        count <= universe,
        "logic error: cannot sample {count} entities from {universe}"
    );
    index::sample(rng, universe, count).into_vec()
}
