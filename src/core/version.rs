//! Program version reported by the version flag

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Version and build identifier of the host program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub build: String,
}

impl VersionInfo {
    pub fn new(version: impl Into<String>, build: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            build: build.into(),
        }
    }

    /// Write `<program> version <version> build <build>` and a newline
    pub fn write_line(&self, program: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} version {} build {}", program, self.version, self.build)
    }
}
