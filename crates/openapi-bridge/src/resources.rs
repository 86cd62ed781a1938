// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Resource lookup for the bridge.
//!
//! Resources are resolved against a loader owned by the bridge, never against
//! the request being served.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use container_context::ResourceStream;
use url::Url;

/// Resolves resource paths to readable content.
///
/// A missing resource is reported as `None`, never as an error.
pub trait ResourceLoader: Send + Sync {
    /// URL identifying the resource.
    fn resource_url(&self, path: &str) -> Option<Url>;

    /// Open the resource for reading.
    fn open(&self, path: &str) -> Option<ResourceStream>;
}

/// Loader without any resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceLoader for NoResources {
    fn resource_url(&self, _path: &str) -> Option<Url> {
        None
    }

    fn open(&self, _path: &str) -> Option<ResourceStream> {
        None
    }
}

/// Strip leading slashes and reject paths that could leave the resource root.
fn normalize(path: &str) -> Option<&str> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let escapes = Path::new(trimmed)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    (!escapes).then_some(trimmed)
}

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, path: &str) -> Option<PathBuf> {
        let candidate = self.root.join(normalize(path)?);
        candidate.is_file().then_some(candidate)
    }
}

impl ResourceLoader for DirectoryResources {
    fn resource_url(&self, path: &str) -> Option<Url> {
        let located = self.locate(path)?;
        let absolute = std::fs::canonicalize(located).ok()?;
        Url::from_file_path(absolute).ok()
    }

    fn open(&self, path: &str) -> Option<ResourceStream> {
        let located = self.locate(path)?;
        match File::open(&located) {
            Ok(file) => Some(Box::new(BufReader::new(file))),
            Err(e) => {
                tracing::debug!(
                    path = %located.display(),
                    error = %e,
                    "Resource could not be opened"
                );
                None
            }
        }
    }
}

/// Serves resources held in memory.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    entries: HashMap<String, Arc<[u8]>>,
}

impl EmbeddedResources {
    /// Create an empty set of resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource. A leading `/` in `path` is ignored.
    pub fn with(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        let key = path.trim_start_matches('/').to_string();
        let contents: Vec<u8> = contents.into();
        self.entries.insert(key, Arc::from(contents));
        self
    }

    fn get(&self, path: &str) -> Option<(&str, &Arc<[u8]>)> {
        let key = normalize(path)?;
        self.entries.get_key_value(key).map(|(k, v)| (k.as_str(), v))
    }
}

impl ResourceLoader for EmbeddedResources {
    fn resource_url(&self, path: &str) -> Option<Url> {
        let (key, _) = self.get(path)?;
        Url::parse(&format!("embedded:///{key}")).ok()
    }

    fn open(&self, path: &str) -> Option<ResourceStream> {
        let (_, contents) = self.get(path)?;
        Some(Box::new(Cursor::new(contents.clone())))
    }
}
