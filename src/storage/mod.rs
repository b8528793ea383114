use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::document::{Guide, parse_guide};
use crate::error::{KnowledgeError, LoadError};

/// Guide file extensions picked up by [`DocumentStore::load`]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mdx", "md", "markdown"];

/// In-memory snapshot of every guide, keyed by identifier.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Default)]
pub struct DocumentStore {
    guides: BTreeMap<String, Guide>,
}

/// What happened while loading a guides directory
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<LoadError>,
}

impl DocumentStore {
    /// Recursively load every supported guide under `root`.
    ///
    /// A guide that cannot be read is skipped and reported; only a missing
    /// root is fatal.
    pub fn load(root: impl AsRef<Path>) -> Result<(Self, LoadReport), KnowledgeError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(KnowledgeError::MissingGuidesRoot(root.to_path_buf()));
        }

        let mut guides = BTreeMap::new();
        let mut report = LoadReport::default();

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() || !is_supported_file(path) {
                continue;
            }

            match load_guide(root, path) {
                Ok(guide) => {
                    tracing::debug!(identifier = %guide.identifier, title = %guide.title, "guide loaded");
                    report.loaded += 1;
                    guides.insert(guide.identifier.clone(), guide);
                }
                Err(error) => {
                    tracing::warn!(%error, "skipping guide");
                    report.skipped.push(error);
                }
            }
        }

        tracing::info!(
            root = %root.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "guides loaded"
        );

        Ok((Self { guides }, report))
    }

    /// Build a store from already-parsed guides
    pub fn from_guides(guides: impl IntoIterator<Item = Guide>) -> Self {
        Self {
            guides: guides
                .into_iter()
                .map(|g| (g.identifier.clone(), g))
                .collect(),
        }
    }

    /// Exact identifier lookup
    pub fn get(&self, identifier: &str) -> Option<&Guide> {
        self.guides.get(identifier)
    }

    /// Exact identifier, else the first identifier (sorted order) containing `name`
    pub fn find(&self, name: &str) -> Option<&Guide> {
        self.get(name).or_else(|| {
            self.guides
                .iter()
                .find(|(identifier, _)| identifier.contains(name))
                .map(|(_, guide)| guide)
        })
    }

    /// All guides in identifier order
    pub fn guides(&self) -> impl Iterator<Item = &Guide> {
        self.guides.values()
    }

    pub fn len(&self) -> usize {
        self.guides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }
}

/// Check if a file has a supported guide extension
pub fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Read and parse one guide
pub fn load_guide(root: &Path, path: &Path) -> Result<Guide, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let identifier = identifier_for(root, path)?;

    Ok(parse_guide(&identifier, path, &source))
}

/// `/`-separated path of `path` relative to `root`
fn identifier_for(root: &Path, path: &Path) -> Result<String, LoadError> {
    let relative = path.strip_prefix(root).map_err(|_| LoadError::OutsideRoot {
        path: PathBuf::from(path),
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
