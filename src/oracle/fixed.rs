//! Fixed companion positions, independent of time.

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::model::Offset;

use super::{OracleError, PositionOracle, Result};

/// A table of companion offsets that do not depend on the observation time.
///
/// Used for companions whose orbit is not in the catalog but whose
/// position is known well enough, and as a fake in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedPositions {
    positions: BTreeMap<String, Offset>,
}

impl FixedPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a companion position.
    #[must_use]
    pub fn with(mut self, companion: &str, offset: Offset) -> Self {
        self.insert(companion, offset);
        self
    }

    pub fn insert(&mut self, companion: &str, offset: Offset) {
        self.positions.insert(companion.to_lowercase(), offset);
    }

    /// Looks up a companion, case-insensitively.
    pub fn get(&self, companion: &str) -> Option<Offset> {
        self.positions.get(&companion.to_lowercase()).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }
}

impl PositionOracle for FixedPositions {
    fn predict(&self, companion: &str, _at: Timestamp) -> Result<Offset> {
        self.get(companion)
            .ok_or_else(|| OracleError::UnknownCompanion(companion.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let fixed = FixedPositions::new().with("HD206893b", Offset::new(124.0, 200.0));
        let got = fixed.predict("hd206893B", Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(got, Offset::new(124.0, 200.0));
    }

    #[test]
    fn unknown_companion_fails() {
        let fixed = FixedPositions::new();
        let err = fixed.predict("nobody", Timestamp::UNIX_EPOCH).unwrap_err();
        assert!(matches!(err, OracleError::UnknownCompanion(name) if name == "nobody"));
    }
}
