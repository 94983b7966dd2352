//! Job templates and their construction-time validation

use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::model::param::{ParamKind, ParameterSpec};
use crate::model::platform::Platform;
use crate::parser::ast::{ItemDecl, JobDecl, Modifier, ParamDecl, ParamKindDecl, VariantItemDecl};

/// Errors raised while building a job template
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Parameter declared twice in the same scope
    #[error("duplicate parameter in job {job}: {param}")]
    DuplicateParameter { job: String, param: String },

    /// Environment entry declared twice in the same scope
    #[error("duplicate environment entry in job {job}: {name}")]
    DuplicateEnv { job: String, name: String },

    /// Select parameter with an empty option set
    #[error("select parameter {param} in job {job} has no options")]
    EmptyOptions { job: String, param: String },

    /// Select option listed twice
    #[error("duplicate option for select parameter {param} in job {job}: {option}")]
    DuplicateOption {
        job: String,
        param: String,
        option: String,
    },

    /// Select default outside its option set
    #[error("default for select parameter {param} in job {job} is not an option: {value}")]
    DefaultNotAnOption {
        job: String,
        param: String,
        value: String,
    },

    /// Platform covered by more than one variant block
    #[error("duplicate platform block in job {job}: {platform}")]
    DuplicatePlatform { job: String, platform: Platform },

    /// Job without a command template
    #[error("missing command in job {job}")]
    MissingCommand { job: String },

    /// Job with more than one command template
    #[error("more than one command in job {job}")]
    DuplicateCommand { job: String },
}

impl DefinitionError {
    pub fn duplicate_parameter(job: impl Into<String>, param: impl Into<String>) -> Self {
        Self::DuplicateParameter {
            job: job.into(),
            param: param.into(),
        }
    }

    pub fn duplicate_env(job: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateEnv {
            job: job.into(),
            name: name.into(),
        }
    }

    pub fn empty_options(job: impl Into<String>, param: impl Into<String>) -> Self {
        Self::EmptyOptions {
            job: job.into(),
            param: param.into(),
        }
    }

    pub fn duplicate_option(
        job: impl Into<String>,
        param: impl Into<String>,
        option: impl Into<String>,
    ) -> Self {
        Self::DuplicateOption {
            job: job.into(),
            param: param.into(),
            option: option.into(),
        }
    }

    pub fn default_not_an_option(
        job: impl Into<String>,
        param: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::DefaultNotAnOption {
            job: job.into(),
            param: param.into(),
            value: value.into(),
        }
    }

    pub fn duplicate_platform(job: impl Into<String>, platform: Platform) -> Self {
        Self::DuplicatePlatform {
            job: job.into(),
            platform,
        }
    }

    pub fn missing_command(job: impl Into<String>) -> Self {
        Self::MissingCommand { job: job.into() }
    }

    pub fn duplicate_command(job: impl Into<String>) -> Self {
        Self::DuplicateCommand { job: job.into() }
    }
}

/// An environment entry: name plus a value template
///
/// Values may contain `%name%` placeholders and are substituted at
/// resolution time; names carry no `env.` prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvEntry {
    pub name: String,
    pub value: String,
}

impl EnvEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Platform-specific additions to a job template
///
/// A variant spec with the same name as a job-level spec replaces it
/// entirely; a variant env entry with the same name as a job-level entry
/// replaces that entry's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformVariant {
    pub params: Vec<ParameterSpec>,
    pub env: Vec<EnvEntry>,
}

impl PlatformVariant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push(EnvEntry::new(name, value));
        self
    }
}

/// A validated, immutable job definition
///
/// Built either from a parsed declaration (`from_decl`) or programmatically
/// with `builder`. All construction paths enforce the same invariants, so a
/// value of this type is always internally consistent.
#[derive(Debug, Clone)]
pub struct JobTemplate {
    name: String,
    display_name: Option<String>,
    params: Vec<ParameterSpec>,
    env: Vec<EnvEntry>,
    variants: BTreeMap<Platform, PlatformVariant>,
    command: String,
}

impl JobTemplate {
    /// Start building a template with the given name
    pub fn builder(name: impl Into<String>) -> JobTemplateBuilder {
        JobTemplateBuilder {
            name: name.into(),
            display_name: None,
            params: Vec::new(),
            env: Vec::new(),
            variants: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Build a validated template from a parsed job declaration
    pub fn from_decl(decl: &JobDecl) -> Result<Self, DefinitionError> {
        let mut builder = JobTemplate::builder(decl.name.node.as_str());
        if let Some(display) = &decl.display_name {
            builder = builder.display_name(display.node.clone());
        }

        for item in &decl.items {
            match &item.node {
                ItemDecl::Param(p) => builder = builder.param(spec_from_decl(p)),
                ItemDecl::Env(e) => {
                    builder = builder.env(e.name.node.as_str(), e.value.node.clone())
                }
                ItemDecl::Platform(block) => {
                    let mut variant = PlatformVariant::default();
                    for vitem in &block.items {
                        match &vitem.node {
                            VariantItemDecl::Param(p) => variant.params.push(spec_from_decl(p)),
                            VariantItemDecl::Env(e) => variant
                                .env
                                .push(EnvEntry::new(e.name.node.as_str(), e.value.node.clone())),
                        }
                    }
                    // One body may be attached to several tags
                    for tag in &block.tags {
                        builder = builder.variant(Platform::from(tag.node), variant.clone());
                    }
                }
                ItemDecl::Command(c) => builder = builder.command(c.joined()),
            }
        }

        builder.build()
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable name shown in listings
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Job-level parameter specs in declaration order
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Job-level environment entries in declaration order
    pub fn env(&self) -> &[EnvEntry] {
        &self.env
    }

    /// Declared platform variants
    pub fn variants(&self) -> &BTreeMap<Platform, PlatformVariant> {
        &self.variants
    }

    /// Variant for one platform, if declared
    pub fn variant(&self, platform: Platform) -> Option<&PlatformVariant> {
        self.variants.get(&platform)
    }

    /// Whether this template can resolve on `platform`
    ///
    /// A template with no variant blocks is platform-independent and supports
    /// every platform; otherwise only the declared platforms are supported.
    pub fn supports(&self, platform: Platform) -> bool {
        self.variants.is_empty() || self.variants.contains_key(&platform)
    }

    /// Platforms this template can resolve on
    pub fn supported_platforms(&self) -> Vec<Platform> {
        if self.variants.is_empty() {
            Platform::all().to_vec()
        } else {
            self.variants.keys().copied().collect()
        }
    }

    /// Command line template with `%name%` placeholders
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Builder for [`JobTemplate`], validated by [`JobTemplateBuilder::build`]
#[derive(Debug)]
pub struct JobTemplateBuilder {
    name: String,
    display_name: Option<String>,
    params: Vec<ParameterSpec>,
    env: Vec<EnvEntry>,
    variants: Vec<(Platform, PlatformVariant)>,
    commands: Vec<String>,
}

impl JobTemplateBuilder {
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push(EnvEntry::new(name, value));
        self
    }

    pub fn variant(mut self, platform: Platform, variant: PlatformVariant) -> Self {
        self.variants.push((platform, variant));
        self
    }

    pub fn command(mut self, template: impl Into<String>) -> Self {
        self.commands.push(template.into());
        self
    }

    /// Validate and produce the immutable template
    pub fn build(self) -> Result<JobTemplate, DefinitionError> {
        let JobTemplateBuilder {
            name,
            display_name,
            params,
            env,
            variants: declared,
            mut commands,
        } = self;

        validate_specs(&name, &params)?;
        validate_env(&name, &env)?;

        let mut variants = BTreeMap::new();
        for (platform, variant) in declared {
            validate_specs(&name, &variant.params)?;
            validate_env(&name, &variant.env)?;
            if variants.insert(platform, variant).is_some() {
                return Err(DefinitionError::duplicate_platform(&name, platform));
            }
        }

        let command = match commands.len() {
            0 => return Err(DefinitionError::missing_command(&name)),
            1 => commands.remove(0),
            _ => return Err(DefinitionError::duplicate_command(&name)),
        };

        Ok(JobTemplate {
            name,
            display_name,
            params,
            env,
            variants,
            command,
        })
    }
}

/// Map a parsed parameter declaration onto a spec
fn spec_from_decl(decl: &ParamDecl) -> ParameterSpec {
    let mut spec = match &decl.kind {
        ParamKindDecl::Text => {
            ParameterSpec::text(decl.name.node.as_str(), decl.default.node.clone())
        }
        ParamKindDecl::Select { options } => ParameterSpec::select(
            decl.name.node.as_str(),
            decl.default.node.clone(),
            options.iter().map(|o| o.node.clone()).collect(),
        ),
    };
    for modifier in &decl.modifiers {
        spec = match &modifier.node {
            Modifier::Prompt => spec.prompt(),
            Modifier::Required => spec.required(),
            Modifier::Description(text) => spec.with_description(text.clone()),
        };
    }
    spec
}

/// Check name uniqueness and per-spec kind invariants within one scope
fn validate_specs(job: &str, specs: &[ParameterSpec]) -> Result<(), DefinitionError> {
    let mut seen = HashSet::new();
    for spec in specs {
        if !seen.insert(spec.name.as_str()) {
            return Err(DefinitionError::duplicate_parameter(job, &spec.name));
        }
        if let ParamKind::Select { options } = &spec.kind {
            if options.is_empty() {
                return Err(DefinitionError::empty_options(job, &spec.name));
            }
            let mut seen_options = HashSet::new();
            for option in options {
                if !seen_options.insert(option.as_str()) {
                    return Err(DefinitionError::duplicate_option(job, &spec.name, option));
                }
            }
            if !options.iter().any(|o| o == &spec.default) {
                return Err(DefinitionError::default_not_an_option(
                    job,
                    &spec.name,
                    &spec.default,
                ));
            }
        }
    }
    Ok(())
}

/// Check environment entry name uniqueness within one scope
fn validate_env(job: &str, entries: &[EnvEntry]) -> Result<(), DefinitionError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(DefinitionError::duplicate_env(job, &entry.name));
        }
    }
    Ok(())
}
