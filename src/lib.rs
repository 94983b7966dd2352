//! JobForge - declarative job templates for CI builds
//!
//! This library provides a parser, validated template model, and parameter
//! resolver for the JobForge definition language. A definition file declares
//! jobs with prompted parameters, per-platform variants, environment entries,
//! and a command-line template; resolution expands one job for one platform
//! into a concrete command line and environment.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use jobforge::{compile, resolve, Platform};
//!
//! let registry = compile(r#"
//!     job perf "Ad hoc performance scenario" {
//!         text runs "10"
//!         command "gradle performanceAdHoc --runs %runs%"
//!     }
//! "#).unwrap();
//!
//! let job = resolve(&registry, "perf", Platform::Linux, &BTreeMap::new()).unwrap();
//! assert_eq!(job.command_line, "gradle performanceAdHoc --runs 10");
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod profile;
pub mod resolve;

pub use error::ParseError;
pub use model::{
    DefinitionError, EnvEntry, JobTemplate, JobTemplateBuilder, ParamKind, ParameterSpec,
    Platform, PlatformVariant, Visibility,
};
pub use parser::{parse, Document};
pub use profile::{AgentProfile, ProfileError};
pub use resolve::{effective_params, resolve, resolve_with, JobRegistry, ResolveError, ResolvedJob};

use thiserror::Error;

/// Errors that can occur while compiling a definition file
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error building a job template from its declaration
    #[error("definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// Error registering or resolving a job
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

impl From<Vec<ParseError>> for ForgeError {
    fn from(errors: Vec<ParseError>) -> Self {
        ForgeError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Compile definition source into a registry of validated job templates
///
/// This is the main entry point for the library. It parses the source,
/// builds each declared job into a validated [`JobTemplate`], and registers
/// them under their names. Resolution happens separately, once per triggered
/// build, via [`resolve`] or [`resolve_with`].
///
/// # Example
///
/// ```rust
/// use jobforge::compile;
///
/// let registry = compile(r#"
///     job perf {
///         select testJavaVendor "openjdk" from ["openjdk", "adoptopenjdk"]
///         command "gradle perf --vendor %testJavaVendor%"
///     }
/// "#).unwrap();
///
/// assert!(registry.contains("perf"));
/// ```
pub fn compile(source: &str) -> Result<JobRegistry, ForgeError> {
    let doc = parse(source)?;

    let mut registry = JobRegistry::new();
    for job in &doc.jobs {
        let template = JobTemplate::from_decl(&job.node)?;
        registry.register(template)?;
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_compile_single_job() {
        let registry = compile(
            r#"
            job perf "Ad hoc performance scenario" {
                text runs "10"
                command "gradle performanceAdHoc --runs %runs%"
            }
        "#,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("perf"));
    }

    #[test]
    fn test_compile_and_resolve() {
        let registry = compile(
            r#"
            job perf {
                text runs "10"
                text testProject "largeJavaMultiProject"
                command "gradle perf --runs %runs% --project %testProject%"
            }
        "#,
        )
        .unwrap();

        let job = resolve(&registry, "perf", Platform::Linux, &BTreeMap::new()).unwrap();
        assert_eq!(
            job.command_line,
            "gradle perf --runs 10 --project largeJavaMultiProject"
        );
    }

    #[test]
    fn test_compile_and_resolve_with_overrides() {
        let registry = compile(
            r#"
            job perf {
                text runs "10"
                command "gradle perf --runs %runs%"
            }
        "#,
        )
        .unwrap();

        let mut overrides = BTreeMap::new();
        overrides.insert("runs".to_string(), "40".to_string());
        let job = resolve(&registry, "perf", Platform::Linux, &overrides).unwrap();
        assert_eq!(job.command_line, "gradle perf --runs 40");
    }

    #[test]
    fn test_compile_platform_variants() {
        let registry = compile(
            r#"
            job perf {
                text profiler ""
                platform windows {
                    text profiler "jprofiler"
                }
                platform linux {
                    text profiler "async-profiler"
                }
                command "gradle perf --profiler %profiler%"
            }
        "#,
        )
        .unwrap();

        let windows = resolve(&registry, "perf", Platform::Windows, &BTreeMap::new()).unwrap();
        let linux = resolve(&registry, "perf", Platform::Linux, &BTreeMap::new()).unwrap();
        assert_eq!(windows.command_line, "gradle perf --profiler jprofiler");
        assert_eq!(linux.command_line, "gradle perf --profiler async-profiler");

        let result = resolve(&registry, "perf", Platform::MacOs, &BTreeMap::new());
        assert!(matches!(
            result,
            Err(ResolveError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn test_compile_syntax_error() {
        let result = compile("job {");
        assert!(matches!(result, Err(ForgeError::Parse(_))));
    }

    #[test]
    fn test_compile_definition_error() {
        let result = compile(
            r#"
            job perf {
                select testJavaVendor "zulu" from ["openjdk", "adoptopenjdk"]
                command "x"
            }
        "#,
        );
        assert!(matches!(
            result,
            Err(ForgeError::Definition(
                DefinitionError::DefaultNotAnOption { .. }
            ))
        ));
    }

    #[test]
    fn test_compile_duplicate_job() {
        let result = compile(
            r#"
            job perf { command "a" }
            job perf { command "b" }
        "#,
        );
        assert!(matches!(
            result,
            Err(ForgeError::Resolve(ResolveError::DuplicateTemplate { .. }))
        ));
    }

    #[test]
    fn test_compile_multiple_jobs() {
        let registry = compile(
            r#"
            job adhoc { command "gradle performanceAdHoc" }
            job historical { command "gradle performanceHistorical" }
        "#,
        )
        .unwrap();
        assert_eq!(registry.names(), vec!["adhoc", "historical"]);
    }

    #[test]
    fn test_parse_error_display_joins_messages() {
        let err = compile("job {").unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("parse errors:"));
    }
}
