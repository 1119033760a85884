//! Where document bytes come from.
//!
//! Parsing never touches the filesystem directly. Every external read (map,
//! tileset, probed image) goes through a [`ResourceReader`], so a host can
//! serve documents from memory, an archive or an embedded bundle.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use normalize_path::NormalizePath;

use crate::error::{TmxError, Result};

/// Source of raw resource bytes.
pub trait ResourceReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

impl<F> ResourceReader for F
where
    F: Fn(&Path) -> Result<Vec<u8>>,
{
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self(path)
    }
}

/// Reads resources from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemReader;

impl ResourceReader for FileSystemReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TmxError::ResourceNotFound {
                path: path.to_path_buf(),
            },
            _ => TmxError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })
    }
}

/// Named resources embedded in the host, consulted before the filesystem.
///
/// A requested path matches an entry whose name ends with it on a path
/// component boundary, so `maps/level1.tmx` finds `assets/maps/level1.tmx`.
/// Names and requests are compared with `/` separators after resolving
/// `.` and `..`. Requests with no match are read from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    entries: Vec<(String, Vec<u8>)>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_resource(mut self, name: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Add a resource. Earlier entries win when several names match.
    pub fn insert(&mut self, name: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) {
        self.entries.push((bundle_key(name.as_ref()), bytes.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bundled bytes for `path`, if any entry matches.
    pub fn find(&self, path: &Path) -> Option<&[u8]> {
        let wanted = bundle_key(path);
        if wanted.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|(name, _)| {
                name == &wanted
                    || (name.ends_with(&wanted)
                        && name[..name.len() - wanted.len()].ends_with('/'))
            })
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl ResourceReader for ResourceBundle {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match self.find(path) {
            Some(bytes) => Ok(bytes.to_vec()),
            None => FileSystemReader.read(path),
        }
    }
}

fn bundle_key(path: &Path) -> String {
    path.normalize()
        .to_string_lossy()
        .replace('\\', "/")
        .trim_start_matches('/')
        .to_string()
}

/// Resolve a `source` attribute against the referencing document's
/// directory.
///
/// `.` components are dropped and each `..` removes the component before
/// it. A `..` with nothing left to remove is kept, so a relative source may
/// climb above the base directory. Absolute sources are kept as is.
pub fn resolve_path(base_dir: &Path, source: &str) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in base_dir.join(source).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match resolved.components().next_back() {
                Some(Component::Normal(_)) => {
                    resolved.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => resolved.push(".."),
            },
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
