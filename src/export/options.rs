//! Export configuration

use std::path::{Path, PathBuf};

use crate::framework::FrameworkVersion;

/// Producer version stamped on every exported graph
pub const PRODUCER_VERSION: i32 = 22;

/// File name of the diagnostic ONNX export written after a failed trace
pub const SCRATCH_FILE_NAME: &str = "dummy.pb";

/// Export options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Framework release that produced the trace
    pub framework: FrameworkVersion,
    /// Print the optimized trace before flattening
    pub verbose: bool,
    /// Skip nodes with inputs missing from the scope map instead of failing
    pub drop_unresolved_nodes: bool,
    /// Name nodes after their first output only
    pub first_output_only: bool,
    /// Where the diagnostic ONNX export goes after a failed trace
    pub scratch_path: PathBuf,
    /// Producer version written to `GraphDef.versions`
    pub producer: i32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            framework: FrameworkVersion::default(),
            verbose: false,
            drop_unresolved_nodes: true,
            first_output_only: true,
            scratch_path: std::env::temp_dir().join(SCRATCH_FILE_NAME),
            producer: PRODUCER_VERSION,
        }
    }
}

impl ExportOptions {
    /// Set the framework version
    pub fn with_framework(mut self, framework: FrameworkVersion) -> Self {
        self.framework = framework;
        self
    }

    /// Enable or disable printing the trace
    pub fn verbose(mut self, enable: bool) -> Self {
        self.verbose = enable;
        self
    }

    /// Enable or disable dropping nodes with unresolved inputs
    pub fn drop_unresolved_nodes(mut self, enable: bool) -> Self {
        self.drop_unresolved_nodes = enable;
        self
    }

    /// Enable or disable first-output-only naming
    pub fn first_output_only(mut self, enable: bool) -> Self {
        self.first_output_only = enable;
        self
    }

    /// Set the diagnostic export path
    pub fn scratch_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.scratch_path = path.as_ref().to_path_buf();
        self
    }
}
