//! Item category to size class resolution.

use log::trace;
use std::collections::HashMap;

use crate::config::CategorySection;
use crate::core::SizeClass;

/// Resolves free-form item categories to a [`SizeClass`].
///
/// Lookup is an exact match on the trimmed, lowercased category, first in
/// the explicit mapping, then against the class names themselves. Anything
/// else falls back to the default class.
#[derive(Clone, Debug)]
pub struct SizeClassifier {
    mapping: HashMap<String, SizeClass>,
    default: SizeClass,
}

impl Default for SizeClassifier {
    fn default() -> Self {
        Self::new(SizeClass::Medium)
    }
}

impl SizeClassifier {
    /// Empty mapping with the given fallback
    pub fn new(default: SizeClass) -> Self {
        Self {
            mapping: HashMap::new(),
            default,
        }
    }

    /// Build from the `categories` config section
    pub fn from_section(section: &CategorySection) -> Self {
        section
            .mapping
            .iter()
            .fold(Self::new(section.default), |classifier, (name, &class)| {
                classifier.with_category(name, class)
            })
    }

    /// Add a category mapping
    pub fn with_category(mut self, category: &str, size_class: SizeClass) -> Self {
        self.mapping.insert(normalize(category), size_class);
        self
    }

    /// Fallback class
    pub fn default_class(&self) -> SizeClass {
        self.default
    }

    /// Resolve a category string
    pub fn classify(&self, category: &str) -> SizeClass {
        let key = normalize(category);
        if let Some(&class) = self.mapping.get(&key) {
            return class;
        }
        key.parse::<SizeClass>().unwrap_or_else(|_| {
            trace!(
                "[Classifier] unmapped category {:?}, using {}",
                category, self.default
            );
            self.default
        })
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}
