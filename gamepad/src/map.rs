//! Button and axis name tables.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::GamepadError;

// ── Standard layout ─────────────────────────────────────────────

/// Button names for the standard controller layout, by browser index.
const STANDARD_BUTTONS: [(&str, usize); 14] = [
    ("A", 0),
    ("B", 1),
    ("X", 2),
    ("Y", 3),
    ("L", 4),
    ("R", 5),
    ("ZL", 6),
    ("ZR", 7),
    ("PLUS", 8),
    ("MINUS", 9),
    ("LCLICK", 10),
    ("RCLICK", 11),
    ("HOME", 12),
    ("CAPTURE", 13),
];

/// Stick names for the standard controller layout, by browser axis index.
const STANDARD_AXES: [(&str, usize); 2] = [("LEFT", 0), ("RIGHT", 1)];

/// Maps human-readable names to the raw indices reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMap {
    pub button: BTreeMap<String, usize>,
    pub axis: BTreeMap<String, usize>,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            button: STANDARD_BUTTONS
                .iter()
                .map(|(name, index)| ((*name).to_owned(), *index))
                .collect(),
            axis: STANDARD_AXES
                .iter()
                .map(|(name, index)| ((*name).to_owned(), *index))
                .collect(),
        }
    }
}

impl ButtonMap {
    /// Parse and validate a map from JSON (`{"button": {...}, "axis": {...}}`).
    ///
    /// # Errors
    ///
    /// Returns [`GamepadError::InvalidMap`] for malformed JSON and
    /// [`GamepadError::DuplicateIndex`] when two names share an index.
    pub fn from_json(raw: &str) -> Result<Self, GamepadError> {
        let map: Self = serde_json::from_str(raw)?;
        map.validate()?;
        Ok(map)
    }

    /// Reject tables where two names resolve to the same index.
    ///
    /// # Errors
    ///
    /// Returns [`GamepadError::DuplicateIndex`] naming both entries.
    pub fn validate(&self) -> Result<(), GamepadError> {
        check_unique("button", &self.button)?;
        check_unique("axis", &self.axis)
    }

    /// Name for a button index, falling back to the index itself.
    #[must_use]
    pub fn button_name(&self, index: usize) -> String {
        reverse_lookup(&self.button, index)
    }

    /// Name for an axis index, falling back to the index itself.
    #[must_use]
    pub fn axis_name(&self, index: usize) -> String {
        reverse_lookup(&self.axis, index)
    }

    #[must_use]
    pub fn button_index(&self, name: &str) -> Option<usize> {
        self.button.get(name).copied()
    }

    #[must_use]
    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.axis.get(name).copied()
    }

    /// Button names ordered by index.
    #[must_use]
    pub fn button_keys(&self) -> Vec<&str> {
        let mut keys: Vec<(&str, usize)> = self.button.iter().map(|(name, index)| (name.as_str(), *index)).collect();
        keys.sort_by_key(|(_, index)| *index);
        keys.into_iter().map(|(name, _)| name).collect()
    }
}

fn reverse_lookup(table: &BTreeMap<String, usize>, index: usize) -> String {
    table
        .iter()
        .find(|(_, value)| **value == index)
        .map_or_else(|| index.to_string(), |(name, _)| name.clone())
}

fn check_unique(kind: &'static str, table: &BTreeMap<String, usize>) -> Result<(), GamepadError> {
    let mut seen: BTreeMap<usize, &str> = BTreeMap::new();
    for (name, index) in table {
        if let Some(first) = seen.insert(*index, name.as_str()) {
            return Err(GamepadError::DuplicateIndex {
                kind,
                index: *index,
                first: first.to_owned(),
                second: name.clone(),
            });
        }
    }
    Ok(())
}
