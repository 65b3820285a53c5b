use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Persists submitted images into the uploads directory.
///
/// Stored names are `<UTC timestamp>_<original name>`, which keeps the
/// original name readable while making same-named uploads from different
/// seconds distinct. Two identical names inside the same second still
/// collide; callers accept that.
pub struct UploadService {
    uploads_path: PathBuf,
}

impl UploadService {
    #[must_use]
    pub fn new(uploads_path: impl Into<PathBuf>) -> Self {
        Self {
            uploads_path: uploads_path.into(),
        }
    }

    #[must_use]
    pub fn uploads_path(&self) -> &Path {
        &self.uploads_path
    }

    /// Write `bytes` under a timestamped name and return the stored file
    /// name, relative to the uploads directory.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{timestamp}_{}", sanitize_filename(original_name));

        if !self.uploads_path.exists() {
            fs::create_dir_all(&self.uploads_path)
                .await
                .with_context(|| {
                    format!(
                        "Failed to create uploads directory {}",
                        self.uploads_path.display()
                    )
                })?;
        }

        let file_path = self.uploads_path.join(&filename);

        fs::write(&file_path, bytes)
            .await
            .with_context(|| format!("Failed to write upload to {}", file_path.display()))?;

        info!(path = %file_path.display(), size = bytes.len(), "Stored upload");

        Ok(filename)
    }
}

/// Only the final path component of the client-supplied name is used, so a
/// name like `../../etc/passwd` cannot escape the uploads directory.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directory_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("photo.jpg"), "photo.jpg");
    }

    #[test]
    fn falls_back_on_empty_names() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("/"), "upload");
    }

    #[tokio::test]
    async fn stores_with_timestamp_prefix() {
        let dir = std::env::temp_dir().join(format!("findit-upload-test-{}", uuid::Uuid::new_v4()));
        let service = UploadService::new(&dir);

        let stored = service.store("wallet.png", b"fake image").await.unwrap();

        assert!(stored.ends_with("_wallet.png"));
        let on_disk = tokio::fs::read(dir.join(&stored)).await.unwrap();
        assert_eq!(on_disk, b"fake image");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
