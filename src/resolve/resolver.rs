//! Parameter merging, validation, and environment/command resolution

use std::collections::BTreeMap;

use crate::model::{EnvEntry, JobTemplate, ParamKind, ParameterSpec, Platform};
use crate::profile::AgentProfile;

use super::error::ResolveError;
use super::registry::JobRegistry;
use super::subst::substitute;

/// Output of one resolution
///
/// Every parameter has been validated against its spec and every well-formed
/// placeholder expanded. Identical inputs produce identical values, and
/// nothing is persisted between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    /// Template name this job was resolved from
    pub job: String,
    /// Platform the job was resolved for
    pub platform: Platform,
    /// Final parameter values
    pub parameters: BTreeMap<String, String>,
    /// Declared environment entries with placeholders expanded
    pub env: BTreeMap<String, String>,
    /// Fully substituted command line
    pub command_line: String,
}

/// Parameter specs in effect for one platform
///
/// Job-level specs keep their declaration order, with a same-name variant
/// spec replacing the job-level one in place; variant-only specs are
/// appended after. Fails if the job does not support `platform`.
pub fn effective_params(
    template: &JobTemplate,
    platform: Platform,
) -> Result<Vec<&ParameterSpec>, ResolveError> {
    if !template.supports(platform) {
        return Err(ResolveError::unsupported_platform(
            template.name(),
            platform,
            template.supported_platforms(),
        ));
    }

    let variant_params: &[ParameterSpec] = template
        .variant(platform)
        .map(|v| v.params.as_slice())
        .unwrap_or(&[]);

    let mut specs = Vec::with_capacity(template.params().len() + variant_params.len());
    for spec in template.params() {
        let replacement = variant_params.iter().find(|v| v.name == spec.name);
        specs.push(replacement.unwrap_or(spec));
    }
    for spec in variant_params {
        if !template.params().iter().any(|p| p.name == spec.name) {
            specs.push(spec);
        }
    }
    Ok(specs)
}

/// Environment entries in effect for one platform, same replacement rule as
/// [`effective_params`]
fn effective_env(template: &JobTemplate, platform: Platform) -> Vec<&EnvEntry> {
    let variant_env: &[EnvEntry] = template
        .variant(platform)
        .map(|v| v.env.as_slice())
        .unwrap_or(&[]);

    let mut entries = Vec::with_capacity(template.env().len() + variant_env.len());
    for entry in template.env() {
        let replacement = variant_env.iter().find(|v| v.name == entry.name);
        entries.push(replacement.unwrap_or(entry));
    }
    for entry in variant_env {
        if !template.env().iter().any(|e| e.name == entry.name) {
            entries.push(entry);
        }
    }
    entries
}

/// Resolve a registered job for one platform with caller overrides
///
/// Merge order, later wins: spec defaults, platform-variant defaults, then
/// `overrides`. The call is a pure function of its arguments; it touches no
/// ambient state and launches nothing.
pub fn resolve(
    registry: &JobRegistry,
    job: &str,
    platform: Platform,
    overrides: &BTreeMap<String, String>,
) -> Result<ResolvedJob, ResolveError> {
    resolve_with(registry, job, platform, overrides, &AgentProfile::default())
}

/// Resolve with an agent profile supplying the base environment and
/// server-side parameter values
///
/// Profile values act as substitution input only: parameters shadow
/// same-name profile parameters, resolved environment entries shadow
/// same-name profile entries, and the profile never appears in the output
/// beyond what templates reference.
pub fn resolve_with(
    registry: &JobRegistry,
    job: &str,
    platform: Platform,
    overrides: &BTreeMap<String, String>,
    profile: &AgentProfile,
) -> Result<ResolvedJob, ResolveError> {
    let template = registry.get(job)?;
    let specs = effective_params(template, platform)?;

    // Defaults overlaid with caller values. Overrides naming parameters the
    // job does not declare are silently ignored (the CLI warns about them).
    let mut parameters: BTreeMap<String, String> = BTreeMap::new();
    for spec in &specs {
        let value = overrides.get(&spec.name).unwrap_or(&spec.default).clone();
        validate_value(spec, &value)?;
        parameters.insert(spec.name.clone(), value);
    }

    // Substitution scope: profile parameters first, profile environment under
    // the env. prefix, then resolved parameters shadowing profile names.
    let mut scope: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in profile.parameters() {
        scope.insert(name.clone(), value.clone());
    }
    for (name, value) in profile.env() {
        scope.insert(format!("env.{}", name), value.clone());
    }
    for (name, value) in &parameters {
        scope.insert(name.clone(), value.clone());
    }

    // Entries resolve in declaration order. Each sees the profile's value of
    // its own name (so PATH can extend itself) and the resolved values of
    // earlier entries.
    let mut env: BTreeMap<String, String> = BTreeMap::new();
    for entry in effective_env(template, platform) {
        let value = substitute(&entry.value, &scope)?;
        scope.insert(format!("env.{}", entry.name), value.clone());
        env.insert(entry.name.clone(), value);
    }

    // The command line resolves last, against the full scope
    let command_line = substitute(template.command(), &scope)?;

    Ok(ResolvedJob {
        job: template.name().to_string(),
        platform,
        parameters,
        env,
        command_line,
    })
}

/// Check one resolved value against its spec
fn validate_value(spec: &ParameterSpec, value: &str) -> Result<(), ResolveError> {
    if let ParamKind::Select { options } = &spec.kind {
        if !options.iter().any(|o| o == value) {
            return Err(ResolveError::invalid_option(
                &spec.name,
                value,
                options.clone(),
            ));
        }
    }
    if value.is_empty() && !spec.allow_empty {
        return Err(ResolveError::missing_required(&spec.name));
    }
    Ok(())
}
