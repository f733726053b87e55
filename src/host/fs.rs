//! Fragments from a site directory on disk

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use super::FragmentSource;
use crate::router::{BasePath, FetchError, FetchResult};

/// Reads fragments from a checked-out copy of the site.
///
/// Fragment URLs are site paths: the base path is stripped and the rest is
/// resolved under `root`. Parent-directory components are refused.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    base: BasePath,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, base: BasePath) -> Self {
        Self {
            root: root.into(),
            base,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a fragment URL onto a file under the site root
    pub fn file_for(&self, url: &str) -> FetchResult<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = path
            .strip_prefix(self.base.as_str())
            .or_else(|| path.strip_prefix('/'))
            .unwrap_or(path);

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(FetchError::InvalidLocation(url.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait(?Send)]
impl FragmentSource for DirSource {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let file = self.file_for(url)?;
        tracing::debug!("Reading fragment {} from {:?}", url, file);

        match tokio::fs::read_to_string(&file).await {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::status(url, 404))
            }
            Err(e) => Err(FetchError::transport(url, e)),
        }
    }
}
