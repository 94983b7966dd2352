//! Target platform enumeration

use std::fmt;
use std::str::FromStr;

use crate::parser::ast::PlatformTag;

/// Operating system a job runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
}

impl Platform {
    /// All platforms in declaration order
    pub fn all() -> [Platform; 3] {
        [Platform::Linux, Platform::Windows, Platform::MacOs]
    }

    /// Platform of the machine running this process
    pub fn host() -> Platform {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Lowercase tag used in definition files and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            "macos" | "mac" | "darwin" => Ok(Platform::MacOs),
            other => Err(format!(
                "unknown platform '{}' (expected linux, windows, or macos)",
                other
            )),
        }
    }
}

impl From<PlatformTag> for Platform {
    fn from(tag: PlatformTag) -> Self {
        match tag {
            PlatformTag::Linux => Platform::Linux,
            PlatformTag::Windows => Platform::Windows,
            PlatformTag::Macos => Platform::MacOs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for platform in Platform::all() {
            assert_eq!(platform.tag().parse::<Platform>(), Ok(platform));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Windows".parse::<Platform>(), Ok(Platform::Windows));
        assert_eq!("darwin".parse::<Platform>(), Ok(Platform::MacOs));
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Platform::Linux.to_string(), "Linux");
        assert_eq!(Platform::MacOs.to_string(), "macOS");
    }

    #[test]
    fn test_host_is_supported() {
        assert!(Platform::all().contains(&Platform::host()));
    }
}
