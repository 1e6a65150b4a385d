// file: src/corpus/scanner.rs
// description: Directory walking and text file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::CorpusConfig;
use crate::error::{Result, ServiceError};
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FileScanner {
    config: CorpusConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
    pub modified: u64,
}

impl FileScanner {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.directory
    }

    /// Files come back sorted by name within each directory so that every
    /// scan of an unchanged corpus yields the same order.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        self.scan_directory(&self.config.directory)
    }

    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        debug!("Scanning directory: {}", root.display());
        if let Err(err) = Validator::validate_directory(root) {
            return Err(ServiceError::FileOperation {
                path: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, err.to_string()),
            });
        }

        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .max_depth(max_depth)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(ServiceError::FileOperation {
                        path: root.to_path_buf(),
                        source: err
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                    });
                }
                Err(err) => {
                    debug!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if !Validator::has_allowed_extension(path, &self.config.extensions) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                debug!("Skipping file without metadata: {}", path.display());
                continue;
            };

            let size = metadata.len();
            if size > max_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    size / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);

            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            files.push(ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size,
                modified,
            });
        }

        debug!("Found {} text files", files.len());
        Ok(files)
    }
}
