//! Error types for job resolution

use thiserror::Error;

use crate::model::Platform;

/// Errors that can occur while registering or resolving jobs
///
/// Every failure is fatal to the resolution attempt that raised it and names
/// the template, parameter, or placeholder involved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Job name already registered
    #[error("duplicate job definition: {name}")]
    DuplicateTemplate { name: String },

    /// Job not found in the registry
    #[error("job not found: {name}")]
    UnknownTemplate {
        name: String,
        suggestions: Vec<String>,
    },

    /// Platform not declared by the job
    #[error("job {job} does not support platform {platform} (supported: {})", supported.iter().map(|p| p.tag()).collect::<Vec<_>>().join(", "))]
    UnsupportedPlatform {
        job: String,
        platform: Platform,
        supported: Vec<Platform>,
    },

    /// Select value outside the declared option set
    #[error("invalid option for parameter {param}: '{value}' (allowed: {})", allowed.join(", "))]
    InvalidOption {
        param: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Required parameter resolved to an empty value
    #[error("missing required parameter: {param}")]
    MissingRequiredParameter { param: String },

    /// Well-formed placeholder with no value in scope
    #[error("unresolved placeholder: %{token}%")]
    UnresolvedPlaceholder { token: String },
}

impl ResolveError {
    /// Create a duplicate job error
    pub fn duplicate_template(name: impl Into<String>) -> Self {
        Self::DuplicateTemplate { name: name.into() }
    }

    /// Create an unknown job error with near-miss suggestions
    pub fn unknown_template(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownTemplate {
            name: name.into(),
            suggestions,
        }
    }

    /// Create an unsupported platform error
    pub fn unsupported_platform(
        job: impl Into<String>,
        platform: Platform,
        supported: Vec<Platform>,
    ) -> Self {
        Self::UnsupportedPlatform {
            job: job.into(),
            platform,
            supported,
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(
        param: impl Into<String>,
        value: impl Into<String>,
        allowed: Vec<String>,
    ) -> Self {
        Self::InvalidOption {
            param: param.into(),
            value: value.into(),
            allowed,
        }
    }

    /// Create a missing required parameter error
    pub fn missing_required(param: impl Into<String>) -> Self {
        Self::MissingRequiredParameter {
            param: param.into(),
        }
    }

    /// Create an unresolved placeholder error
    pub fn unresolved(token: impl Into<String>) -> Self {
        Self::UnresolvedPlaceholder {
            token: token.into(),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownTemplate { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for i in 0..=m {
        dp[i][0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

/// Find similar names within a maximum edit distance
pub(crate) fn find_similar<'a>(
    defined: impl Iterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(String, usize)> = defined
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            if dist <= max_distance && dist > 0 {
                Some((name.to_string(), dist))
            } else {
                None
            }
        })
        .collect();

    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name)
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("adhoc", "adhoc"), 0);
    }

    #[test]
    fn test_levenshtein_one_off() {
        assert_eq!(levenshtein_distance("adhoc", "adhc"), 1);
        assert_eq!(levenshtein_distance("adhoc", "adhok"), 1);
    }

    #[test]
    fn test_levenshtein_different() {
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
    }

    #[test]
    fn test_find_similar() {
        let names = ["adhoc", "distributed", "historical"];
        let suggestions = find_similar(names.iter().copied(), "adhok", 2);
        assert!(suggestions.contains(&"adhoc".to_string()));
    }

    #[test]
    fn test_find_similar_excludes_exact_match() {
        let names = ["adhoc"];
        let suggestions = find_similar(names.iter().copied(), "adhoc", 2);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_invalid_option_display() {
        let err = ResolveError::invalid_option(
            "testJavaVendor",
            "zulu",
            vec!["openjdk".to_string(), "adoptopenjdk".to_string()],
        );
        let message = err.to_string();
        assert!(message.contains("testJavaVendor"));
        assert!(message.contains("zulu"));
        assert!(message.contains("openjdk, adoptopenjdk"));
    }

    #[test]
    fn test_unsupported_platform_display() {
        let err = ResolveError::unsupported_platform(
            "perf",
            Platform::MacOs,
            vec![Platform::Linux, Platform::Windows],
        );
        let message = err.to_string();
        assert!(message.contains("macOS"));
        assert!(message.contains("linux, windows"));
    }

    #[test]
    fn test_unresolved_placeholder_display() {
        let err = ResolveError::unresolved("undeclaredParam");
        assert_eq!(
            err.to_string(),
            "unresolved placeholder: %undeclaredParam%"
        );
    }
}
