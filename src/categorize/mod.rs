use crate::models::{Category, Settings, BUILTIN_KEYWORDS};

/// Keyword-based auto-categorization over an explicitly ordered entry
/// list: built-in entries in declaration order, a user override of a
/// built-in keyword replaces its value in place, and remaining user
/// entries follow in ascending keyword order.
pub(crate) struct Categorizer {
    entries: Vec<(String, Category)>,
}

impl Categorizer {
    pub(crate) fn new(settings: &Settings) -> Self {
        let mut entries: Vec<(String, Category)> = BUILTIN_KEYWORDS
            .iter()
            .map(|(k, c)| ((*k).to_string(), *c))
            .collect();

        for (keyword, category) in &settings.keyword_map {
            match entries.iter_mut().find(|(k, _)| k == keyword) {
                Some(entry) => entry.1 = *category,
                None => entries.push((keyword.clone(), *category)),
            }
        }

        Self { entries }
    }

    /// Return the category of the first keyword contained in the
    /// description, or `None` when nothing matches. Matching is
    /// case-insensitive; callers fall back to the user-selected category.
    pub(crate) fn categorize(&self, description: &str) -> Option<Category> {
        let desc_lower = description.to_lowercase();

        for (keyword, category) in &self.entries {
            if desc_lower.contains(keyword.as_str()) {
                return Some(*category);
            }
        }

        None
    }

    /// Ordered view of the effective keyword table, for display.
    pub(crate) fn entries(&self) -> &[(String, Category)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests;
