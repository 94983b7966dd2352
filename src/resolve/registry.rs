//! Registry for storing job templates

use std::collections::HashMap;

use crate::model::JobTemplate;

use super::error::{find_similar, ResolveError};

/// Registry of job templates, keyed by name
///
/// A registry is plain data owned by the caller; nothing in this crate keeps
/// a process-global instance. Registration needs `&mut self`, so a populated
/// registry can be shared immutably for concurrent resolution.
#[derive(Debug, Default)]
pub struct JobRegistry {
    templates: HashMap<String, JobTemplate>,
}

impl JobRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, rejecting duplicate names
    pub fn register(&mut self, template: JobTemplate) -> Result<(), ResolveError> {
        if self.templates.contains_key(template.name()) {
            return Err(ResolveError::duplicate_template(template.name()));
        }
        self.templates.insert(template.name().to_string(), template);
        Ok(())
    }

    /// Get a template by name, with near-miss suggestions on failure
    pub fn get(&self, name: &str) -> Result<&JobTemplate, ResolveError> {
        self.templates.get(name).ok_or_else(|| {
            ResolveError::unknown_template(
                name,
                find_similar(self.templates.keys().map(|s| s.as_str()), name, 2),
            )
        })
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// All registered template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Iterate registered templates in name order
    pub fn iter(&self) -> impl Iterator<Item = &JobTemplate> {
        let mut templates: Vec<&JobTemplate> = self.templates.values().collect();
        templates.sort_by_key(|t| t.name());
        templates.into_iter()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry has no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str) -> JobTemplate {
        JobTemplate::builder(name)
            .command("x")
            .build()
            .expect("Should build")
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = JobRegistry::new();
        registry.register(template("adhoc")).expect("Should register");
        assert!(registry.contains("adhoc"));
        assert!(registry.get("adhoc").is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = JobRegistry::new();
        registry
            .register(template("adhoc"))
            .expect("First register should succeed");
        let result = registry.register(template("adhoc"));
        assert!(matches!(
            result,
            Err(ResolveError::DuplicateTemplate { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_name_suggests_near_misses() {
        let mut registry = JobRegistry::new();
        registry.register(template("adhoc")).expect("Should register");
        registry
            .register(template("distributed"))
            .expect("Should register");

        let err = registry.get("adhok").expect_err("Should fail");
        match &err {
            ResolveError::UnknownTemplate { name, suggestions } => {
                assert_eq!(name, "adhok");
                assert_eq!(suggestions, &vec!["adhoc".to_string()]);
            }
            other => panic!("Expected UnknownTemplate, got {:?}", other),
        }
        assert_eq!(err.suggestions(), Some(&["adhoc".to_string()][..]));
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = JobRegistry::new();
        registry.register(template("zeta")).expect("Should register");
        registry.register(template("alpha")).expect("Should register");
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
    }
}
