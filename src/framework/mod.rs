//! Training framework version handling
//!
//! Traces produced by different framework releases differ in a few details that
//! the exporter has to know about up front:
//!
//! | Version | Primary input id | Optimization call |
//! |---------|------------------|-------------------|
//! | < 0.4   | `"1"`            | [`OptimizeCall::Legacy`] |
//! | >= 0.4  | `"0"`            | [`OptimizeCall::WithExportFlag`]`(false)` |
//!
//! # Example
//!
//! ```ignore
//! use trace_graphdef::framework::FrameworkVersion;
//!
//! let version = FrameworkVersion::parse("0.3.1")?;
//! assert_eq!(version.primary_input_id(), "1");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ExportError, ExportResult};

/// First release whose traces number the primary input `"0"`
pub const MODERN_TRACE_VERSION: FrameworkVersion = FrameworkVersion::new(0, 4, 0);

/// Shape of the framework's trace optimization call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeCall {
    /// Older releases take no extra argument
    Legacy,
    /// Newer releases take a single boolean export flag
    WithExportFlag(bool),
}

/// Training framework release, compared as `major.minor.patch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl FrameworkVersion {
    /// Create a version from its components
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a release string such as `0.4.1`, `1.0` or `0.3.0.post4`
    ///
    /// Missing components default to zero. Anything after the first
    /// non-numeric component (local tags, `post`/`rc` suffixes) is ignored.
    pub fn parse(version: &str) -> ExportResult<Self> {
        let core = version.split('+').next().unwrap_or_default();
        let mut parts = [0u32; 3];
        let mut seen = 0;

        for (slot, component) in parts.iter_mut().zip(core.split('.')) {
            let digits: String = component.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                break;
            }
            *slot = digits
                .parse()
                .map_err(|_| ExportError::InvalidVersion(version.to_string()))?;
            seen += 1;
            if digits.len() != component.len() {
                break;
            }
        }

        if seen == 0 {
            return Err(ExportError::InvalidVersion(version.to_string()));
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }

    /// Whether traces from this release use the modern numbering
    pub fn is_modern(&self) -> bool {
        *self >= MODERN_TRACE_VERSION
    }

    /// Identifier of the graph's primary input value
    pub fn primary_input_id(&self) -> &'static str {
        if self.is_modern() {
            "0"
        } else {
            "1"
        }
    }

    /// Optimization call shape for this release
    pub fn optimize_call(&self) -> OptimizeCall {
        if self.is_modern() {
            OptimizeCall::WithExportFlag(false)
        } else {
            OptimizeCall::Legacy
        }
    }
}

impl Default for FrameworkVersion {
    fn default() -> Self {
        MODERN_TRACE_VERSION
    }
}

impl FromStr for FrameworkVersion {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
