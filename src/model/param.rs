//! Parameter specifications

/// Kind of a declared parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Free-form text value
    Text,
    /// Enumerated choice restricted to an option set
    Select { options: Vec<String> },
}

/// Whether a parameter is shown when the job is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Entered by the person triggering the job
    Prompt,
    /// Resolved from its default, not shown
    Fixed,
}

/// A declared job parameter
///
/// Parameters are `Fixed` and allow empty values unless marked otherwise:
///
/// ```
/// use jobforge::{ParameterSpec, Visibility};
///
/// let spec = ParameterSpec::text("testProject", "").prompt().required();
/// assert_eq!(spec.visibility, Visibility::Prompt);
/// assert!(!spec.allow_empty);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParamKind,
    pub default: String,
    pub allow_empty: bool,
    pub visibility: Visibility,
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Create a fixed free-form parameter
    pub fn text(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Text,
            default: default.into(),
            allow_empty: true,
            visibility: Visibility::Fixed,
            description: None,
        }
    }

    /// Create a fixed select parameter restricted to `options`
    pub fn select(
        name: impl Into<String>,
        default: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Select { options },
            default: default.into(),
            allow_empty: true,
            visibility: Visibility::Fixed,
            description: None,
        }
    }

    /// Show this parameter when the job is triggered
    pub fn prompt(mut self) -> Self {
        self.visibility = Visibility::Prompt;
        self
    }

    /// Reject empty resolved values for this parameter
    pub fn required(mut self) -> Self {
        self.allow_empty = false;
        self
    }

    /// Attach a human-readable description
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}
