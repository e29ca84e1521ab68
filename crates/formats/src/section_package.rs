use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::manifest::{MANIFEST_VERSION, SectionManifest};

pub const MANIFEST_FILE_NAME: &str = "section.manifest.json";

/// A section package directory: the manifest plus the dataset and contour
/// files it points at.
#[derive(Debug, Clone)]
pub struct SectionPackage {
    root: PathBuf,
    manifest: SectionManifest,
}

#[derive(Debug)]
pub enum SectionPackageError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnsupportedVersion { found: String },
}

impl fmt::Display for SectionPackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionPackageError::Io(err) => write!(f, "I/O error: {err}"),
            SectionPackageError::Parse(err) => write!(f, "Manifest parse error: {err}"),
            SectionPackageError::UnsupportedVersion { found } => {
                write!(f, "Unsupported manifest version: {found}")
            }
        }
    }
}

impl std::error::Error for SectionPackageError {}

impl SectionPackage {
    /// Loads and validates the manifest at `root`/[`MANIFEST_FILE_NAME`].
    pub fn load(root: impl AsRef<Path>) -> Result<Self, SectionPackageError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE_NAME);
        let text = fs::read_to_string(&manifest_path).map_err(SectionPackageError::Io)?;
        let manifest: SectionManifest =
            serde_json::from_str(&text).map_err(SectionPackageError::Parse)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(SectionPackageError::UnsupportedVersion {
                found: manifest.version,
            });
        }
        Ok(Self { root, manifest })
    }

    pub fn manifest(&self) -> &SectionManifest {
        &self.manifest
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
