//! Abstract Syntax Tree types for the jobforge definition language

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore segments joined by dots,
/// starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete definition document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub jobs: Vec<Spanned<JobDecl>>,
}

/// Job declaration: `job name "Display Name" { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct JobDecl {
    pub name: Spanned<Identifier>,
    pub display_name: Option<Spanned<String>>,
    pub items: Vec<Spanned<ItemDecl>>,
}

/// Item inside a job body
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDecl {
    /// Parameter declaration: `text runs "10" [prompt]` or `select vendor ... from [...]`
    Param(ParamDecl),
    /// Environment entry: `env FG_HOME_DIR "/opt/FlameGraph"`
    Env(EnvDecl),
    /// Platform variant block: `platform linux, macos { ... }`
    Platform(PlatformDecl),
    /// Command line template: `command "gradle clean" "%scenario%"`
    Command(CommandDecl),
}

/// Parameter declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: Spanned<Identifier>,
    pub kind: ParamKindDecl,
    pub default: Spanned<String>,
    pub modifiers: Vec<Spanned<Modifier>>,
}

/// Declared parameter kind
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKindDecl {
    /// Free-form text value
    Text,
    /// Enumerated choice: `select name "default" from ["a", "b"]`
    Select { options: Vec<Spanned<String>> },
}

/// Parameter modifier inside `[...]`
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    /// Shown at trigger time
    Prompt,
    /// Must resolve to a non-empty value
    Required,
    /// Human-readable description: `desc: "..."`
    Description(String),
}

/// Environment entry declaration
#[derive(Debug, Clone, PartialEq)]
pub struct EnvDecl {
    pub name: Spanned<Identifier>,
    pub value: Spanned<String>,
}

/// Platform tag keyword in a variant block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTag {
    Linux,
    Windows,
    Macos,
}

impl PlatformTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::Linux => "linux",
            PlatformTag::Windows => "windows",
            PlatformTag::Macos => "macos",
        }
    }
}

/// Platform variant block
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDecl {
    /// Tags this body applies to (at least 1)
    pub tags: Vec<Spanned<PlatformTag>>,
    pub items: Vec<Spanned<VariantItemDecl>>,
}

/// Item inside a platform variant body (no nesting, no command)
#[derive(Debug, Clone, PartialEq)]
pub enum VariantItemDecl {
    Param(ParamDecl),
    Env(EnvDecl),
}

/// Command line template, one or more string fragments
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDecl {
    pub fragments: Vec<Spanned<String>>,
}

impl CommandDecl {
    /// Join fragments into the final command line template with single spaces
    pub fn joined(&self) -> String {
        let parts: Vec<&str> = self.fragments.iter().map(|f| f.node.as_str()).collect();
        parts.join(" ")
    }
}
