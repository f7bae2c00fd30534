//! Discovery of benchmark instances.
//!
//! Instances are the TSPLIB files (`.tsp` for symmetric, `.atsp` for
//! asymmetric problems) sitting directly in the data directory. Their
//! contents are never read here; the solver parses them itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extensions recognised as instances (compared case-insensitively)
pub const INSTANCE_EXTENSIONS: [&str; 2] = ["tsp", "atsp"];

/// Kind of instance file, derived from its extension
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum InstanceKind {
    /// Symmetric TSPLIB instance
    Tsp,
    /// Asymmetric TSPLIB instance
    Atsp,
}

impl InstanceKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsp" => Some(InstanceKind::Tsp),
            "atsp" => Some(InstanceKind::Atsp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// A problem instance handed to the solver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Path passed verbatim to the solver
    pub path: PathBuf,
    /// File name, used as the row label
    pub name: String,
    /// Symmetric or asymmetric
    pub kind: InstanceKind,
}

impl Instance {
    /// Build an instance from a path, or `None` if the extension is not recognised.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        let kind = InstanceKind::from_path(path)?;
        let name = path.file_name()?.to_string_lossy().into_owned();

        Some(Instance {
            path: path.to_path_buf(),
            name,
            kind,
        })
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// List the instances of a directory, sorted by file name.
///
/// Only files directly inside `dir` are considered; symlinks are followed,
/// so a data directory of links into a TSPLIB checkout works. A directory
/// without any instance yields an empty vector; deciding whether that is
/// fatal is up to the caller.
pub fn list_instances<P: AsRef<Path>>(dir: P) -> io::Result<Vec<Instance>> {
    let mut instances = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(instance) = Instance::from_path(path) {
            instances.push(instance);
        }
    }

    instances.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(instances)
}
