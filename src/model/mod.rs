//! Validated job template model

pub mod param;
pub mod platform;
pub mod template;

pub use param::{ParamKind, ParameterSpec, Visibility};
pub use platform::Platform;
pub use template::{DefinitionError, EnvEntry, JobTemplate, JobTemplateBuilder, PlatformVariant};
