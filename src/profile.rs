//! Agent profiles supplying external input to resolution
//!
//! A profile describes one build agent: its base environment and the
//! server-side parameter values available on it. Profiles are pure
//! substitution input; resolution never reads the ambient process
//! environment.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing agent profiles
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse profile TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A build agent's environment and server parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentProfile {
    name: Option<String>,
    description: Option<String>,
    env: BTreeMap<String, String>,
    parameters: BTreeMap<String, String>,
}

/// TOML structure for deserializing profiles
#[derive(Deserialize)]
struct TomlProfile {
    meta: Option<TomlMeta>,
    #[serde(default)]
    env: BTreeMap<String, String>,
    #[serde(default)]
    parameters: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMeta {
    name: Option<String>,
    description: Option<String>,
}

impl AgentProfile {
    /// Load a profile from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a profile from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ProfileError> {
        let parsed: TomlProfile = toml::from_str(content)?;

        Ok(AgentProfile {
            name: parsed.meta.as_ref().and_then(|m| m.name.clone()),
            description: parsed.meta.as_ref().and_then(|m| m.description.clone()),
            env: parsed.env,
            parameters: parsed.parameters,
        })
    }

    /// Profile name, if the file declares one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Profile description, if the file declares one
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Base environment, referenced from templates as `%env.NAME%`
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Server-side parameter values, referenced from templates by name
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Add one base environment entry
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Add one server parameter
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}
