//! Content persistence.
//!
//! The backend stores articles as whole records: every save is a full
//! upsert keyed by slug. [`FileContentStore`] keeps one JSON file per slug in
//! a content directory.

use crate::article::{is_valid_slug, AdminToken, Article};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid article JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid slug '{0}': use lowercase letters, digits and single dashes")]
    InvalidSlug(String),
    #[error("Article '{0}' not found")]
    NotFound(String),
}

/// Collaborator that persists full article records.
pub trait ContentStore {
    /// Create or fully replace the article with `article.slug`.
    fn upsert(&mut self, token: &AdminToken, article: &Article) -> Result<(), StoreError>;

    fn get(&self, slug: &str) -> Result<Article, StoreError>;

    /// All articles, newest date first.
    fn list(&self) -> Result<Vec<Article>, StoreError>;

    fn delete(&mut self, token: &AdminToken, slug: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileContentStore {
    root: PathBuf,
}

impl FileContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, slug: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_slug(slug) {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        Ok(self.root.join(format!("{slug}.json")))
    }

    fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ContentStore for FileContentStore {
    fn upsert(&mut self, token: &AdminToken, article: &Article) -> Result<(), StoreError> {
        let path = self.path_for(&article.slug)?;
        fs::create_dir_all(&self.root).map_err(Self::io_error(&self.root))?;

        let json = serde_json::to_string_pretty(article)?;
        let staging = path.with_extension("json.tmp");
        let saved = fs::write(&staging, json)
            .map_err(Self::io_error(&staging))
            .and_then(|()| fs::rename(&staging, &path).map_err(Self::io_error(&path)));
        if let Err(err) = saved {
            // A failed save leaves no staging file behind.
            if let Err(cleanup) = fs::remove_file(&staging) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %staging.display(),
                        error = %cleanup,
                        "Could not remove staging file"
                    );
                }
            }
            return Err(err);
        }

        tracing::info!(slug = %article.slug, by = token.subject(), "Article saved");
        Ok(())
    }

    fn get(&self, slug: &str) -> Result<Article, StoreError> {
        let path = self.path_for(slug)?;
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(slug.to_string()))
            }
            Err(err) => return Err(Self::io_error(&path)(err)),
        };
        Ok(serde_json::from_str(&source)?)
    }

    fn list(&self) -> Result<Vec<Article>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Self::io_error(&self.root)(err)),
        };

        let mut articles = Vec::new();
        for entry in entries {
            let path = entry.map_err(Self::io_error(&self.root))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let source = fs::read_to_string(&path).map_err(Self::io_error(&path))?;
            articles.push(serde_json::from_str::<Article>(&source)?);
        }
        articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Ok(articles)
    }

    fn delete(&mut self, token: &AdminToken, slug: &str) -> Result<(), StoreError> {
        let path = self.path_for(slug)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(slug, by = token.subject(), "Article deleted");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(slug.to_string()))
            }
            Err(err) => Err(Self::io_error(&path)(err)),
        }
    }
}
