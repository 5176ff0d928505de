//! Work-time attribution per category.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::PomodoroError;

/// Category every ledger starts with.
pub const DEFAULT_CATEGORY: &str = "General";

/// Accumulated work seconds per category, plus the current selection.
///
/// Always holds at least [`DEFAULT_CATEGORY`] and the selection always names
/// an existing entry. Iteration is sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Categories {
    totals: BTreeMap<String, f64>,
    selected: String,
}

impl Default for Categories {
    fn default() -> Self {
        Self::new()
    }
}

impl Categories {
    /// Create a ledger seeded with [`DEFAULT_CATEGORY`] at zero.
    #[must_use]
    pub fn new() -> Self {
        let mut totals = BTreeMap::new();
        totals.insert(DEFAULT_CATEGORY.to_string(), 0.0);
        Self {
            totals,
            selected: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Add a category with a zero total.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if the name is empty or already present.
    pub fn add(&mut self, name: &str) -> Result<(), PomodoroError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PomodoroError::InvalidArgument(
                "category name cannot be empty".to_string(),
            ));
        }
        if self.totals.contains_key(name) {
            return Err(PomodoroError::InvalidArgument(format!(
                "category '{name}' already exists"
            )));
        }

        self.totals.insert(name.to_string(), 0.0);
        Ok(())
    }

    /// Make `name` the category that receives completed work time.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if the category does not exist.
    pub fn select(&mut self, name: &str) -> Result<(), PomodoroError> {
        let name = name.trim();
        if !self.totals.contains_key(name) {
            return Err(PomodoroError::InvalidArgument(format!(
                "unknown category '{name}'"
            )));
        }

        name.clone_into(&mut self.selected);
        Ok(())
    }

    /// Select [`DEFAULT_CATEGORY`] again. Totals are untouched.
    pub fn select_default(&mut self) {
        DEFAULT_CATEGORY.clone_into(&mut self.selected);
    }

    /// Add `seconds` to the selected category. Returns its name.
    pub fn credit(&mut self, seconds: f64) -> &str {
        let total = self.totals.entry(self.selected.clone()).or_insert(0.0);
        *total += seconds.max(0.0);
        &self.selected
    }

    /// Currently selected category.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Accumulated seconds for a category.
    #[must_use]
    pub fn total(&self, name: &str) -> Option<f64> {
        self.totals.get(name).copied()
    }

    /// Check if a category exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.totals.contains_key(name)
    }

    /// Categories and totals in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Check if there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Position of the selected category in name order.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.totals
            .keys()
            .position(|name| *name == self.selected)
            .unwrap_or(0)
    }

    /// Read-only copy of the totals.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.totals.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_general() {
        let categories = Categories::new();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories.selected(), "General");
        assert_eq!(categories.total("General"), Some(0.0));
    }

    #[test]
    fn test_add_and_select() {
        let mut categories = Categories::new();
        categories.add("Writing").unwrap();
        categories.select("Writing").unwrap();

        assert_eq!(categories.selected(), "Writing");
        assert_eq!(categories.total("Writing"), Some(0.0));
    }

    #[test]
    fn test_add_trims_whitespace() {
        let mut categories = Categories::new();
        categories.add("  Reading ").unwrap();
        assert!(categories.contains("Reading"));
    }

    #[test]
    fn test_add_rejects_empty_and_duplicate() {
        let mut categories = Categories::new();
        let before = categories.clone();

        assert!(matches!(
            categories.add(""),
            Err(PomodoroError::InvalidArgument(_))
        ));
        assert!(matches!(
            categories.add("   "),
            Err(PomodoroError::InvalidArgument(_))
        ));
        assert!(matches!(
            categories.add("General"),
            Err(PomodoroError::InvalidArgument(_))
        ));
        assert_eq!(categories, before);
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let mut categories = Categories::new();
        assert!(categories.select("Nope").is_err());
        assert_eq!(categories.selected(), "General");
    }

    #[test]
    fn test_credit_only_selected() {
        let mut categories = Categories::new();
        categories.add("Code").unwrap();
        categories.select("Code").unwrap();

        assert_eq!(categories.credit(1500.0), "Code");
        assert_eq!(categories.total("Code"), Some(1500.0));
        assert_eq!(categories.total("General"), Some(0.0));
    }

    #[test]
    fn test_select_default_keeps_totals() {
        let mut categories = Categories::new();
        categories.add("Code").unwrap();
        categories.select("Code").unwrap();
        categories.credit(60.0);

        categories.select_default();

        assert_eq!(categories.selected(), DEFAULT_CATEGORY);
        assert_eq!(categories.total("Code"), Some(60.0));
    }

    #[test]
    fn test_iter_sorted() {
        let mut categories = Categories::new();
        categories.add("Zeta").unwrap();
        categories.add("Alpha").unwrap();

        let names: Vec<&str> = categories.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Alpha", "General", "Zeta"]);
        assert_eq!(categories.selected_index(), 1);
    }
}
