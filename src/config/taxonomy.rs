//! Course taxonomy and free-text course classification
//!
//! Deal rows carry a free-form course label. The taxonomy maps each
//! course category to one or more match patterns; a deal belongs to a
//! category when any pattern appears in its label (case-insensitive).
//! A deal may belong to several categories at once — this is a
//! multi-label classifier, not a partition.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Maps a free-text course label to zero or more category tags.
/// Abstracted so the matching ruleset can evolve without touching the
/// penalty engine.
pub trait CourseClassifier {
    /// All category names the classifier can emit, in report order
    fn categories(&self) -> Vec<String>;

    /// Category tags for one course label (possibly empty, possibly several)
    fn classify(&self, label: &str) -> Vec<String>;
}

/// One course category and its match patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCategory {
    pub name: String,
    /// Case-insensitive substrings; any hit tags the deal with this category
    pub patterns: Vec<String>,
}

/// Category → patterns table, loadable from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseTaxonomy {
    pub categories: Vec<CourseCategory>,
}

impl CourseTaxonomy {
    /// Load a taxonomy from JSON:
    /// `{"categories": [{"name": ..., "patterns": [...]}, ...]}`
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, EngineError> {
        let taxonomy: CourseTaxonomy = serde_json::from_reader(reader)?;
        Ok(taxonomy)
    }

    /// Builtin course catalog
    pub fn default_catalog() -> Self {
        let categories = [
            ("Data Science", &["data science", "data analytics", "machine learning"][..]),
            ("Digital Marketing", &["digital marketing", "seo", "social media"][..]),
            ("Full Stack Development", &["full stack", "mern", "web development"][..]),
            ("Cyber Security", &["cyber", "ethical hacking", "security"][..]),
        ];

        Self {
            categories: categories
                .iter()
                .map(|(name, patterns)| CourseCategory {
                    name: name.to_string(),
                    patterns: patterns.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
        }
    }
}

/// Substring-matching classifier backed by a [`CourseTaxonomy`].
/// Patterns are lowercased once at construction.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    categories: Vec<(String, Vec<String>)>,
}

impl PatternClassifier {
    pub fn new(taxonomy: &CourseTaxonomy) -> Self {
        let categories = taxonomy
            .categories
            .iter()
            .map(|c| {
                let patterns = c.patterns.iter().map(|p| p.to_lowercase()).collect();
                (c.name.clone(), patterns)
            })
            .collect();
        Self { categories }
    }
}

impl CourseClassifier for PatternClassifier {
    fn categories(&self) -> Vec<String> {
        self.categories.iter().map(|(name, _)| name.clone()).collect()
    }

    fn classify(&self, label: &str) -> Vec<String> {
        let label = label.to_lowercase();
        self.categories
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|p| label.contains(p.as_str())))
            .map(|(name, _)| name.clone())
            .collect()
    }
}
