//! 本地文件系统图片存储
//!
//! 文件写入 `{root}/{public_prefix}/{filename}`，对外只暴露 `{public_prefix}/{filename}`。

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use catalog_errors::{AppError, AppResult};
use chrono::Utc;
use metrics::counter;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{error, info};

use crate::domain::storage::ImageStorage;

pub struct LocalImageStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_matches('/').to_string(),
        }
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// 静态文件目录，即 `{root}/{public_prefix}`
    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.public_prefix)
    }

    /// 校验对外路径并解析为物理路径
    fn resolve(&self, public_path: &str) -> AppResult<PathBuf> {
        let path = Path::new(public_path);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || !path.starts_with(&self.public_prefix) {
            return Err(AppError::bad_request(format!(
                "Image path {} is outside of {}",
                public_path, self.public_prefix
            )));
        }
        Ok(self.root.join(path))
    }
}

/// 高精度时间戳加原扩展名
fn generate_filename(original_name: &str) -> String {
    let stamp = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", stamp, ext),
        _ => stamp.to_string(),
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn upload(
        &self,
        original_name: &str,
        content: &mut (dyn AsyncRead + Unpin + Send),
    ) -> AppResult<String> {
        let dir = self.public_dir();
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::internal(format!("Failed to create image directory: {}", e))
        })?;

        let filename = generate_filename(original_name);
        let target = dir.join(&filename);

        // create_new：同名文件已存在时失败而不是覆盖
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create image file: {}", e)))?;

        let written = match tokio::io::copy(content, &mut file).await {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                if let Err(cleanup) = fs::remove_file(&target).await {
                    error!(path = %target.display(), error = %cleanup, "Failed to remove partial image");
                }
                return Err(AppError::internal(format!("Failed to write image: {}", e)));
            }
        };
        file.flush()
            .await
            .map_err(|e| AppError::internal(format!("Failed to flush image: {}", e)))?;

        counter!("catalog_images_uploaded_total").increment(1);
        let public_path = format!("{}/{}", self.public_prefix, filename);
        info!(path = %public_path, bytes = written, "Image stored");
        Ok(public_path)
    }

    async fn delete(&self, public_path: &str) -> AppResult<()> {
        let target = self.resolve(public_path)?;

        fs::remove_file(&target).await.map_err(|e| {
            error!(path = %public_path, error = %e, "Failed to delete image");
            if e.kind() == ErrorKind::NotFound {
                AppError::not_found(format!("Image {} not found", public_path))
            } else {
                AppError::internal(format!("Failed to delete image: {}", e))
            }
        })?;

        info!(path = %public_path, "Image deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_writes_under_public_prefix() {
        let root = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(root.path(), "/images/");

        let mut content: &[u8] = b"fake png bytes";
        let public_path = storage.upload("shirt.png", &mut content).await.unwrap();

        assert!(public_path.starts_with("images/"));
        assert!(public_path.ends_with(".png"));
        let stored = std::fs::read(root.path().join(&public_path)).unwrap();
        assert_eq!(stored, b"fake png bytes");
    }

    #[tokio::test]
    async fn test_upload_without_extension() {
        let root = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(root.path(), "images");

        let mut content: &[u8] = b"raw";
        let public_path = storage.upload("blob", &mut content).await.unwrap();

        let filename = public_path.strip_prefix("images/").unwrap();
        assert!(filename.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let root = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(root.path(), "images");

        let mut content: &[u8] = b"bytes";
        let public_path = storage.upload("a.jpg", &mut content).await.unwrap();
        storage.delete(&public_path).await.unwrap();

        assert!(!root.path().join(&public_path).exists());
        let err = storage.delete(&public_path).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_rejects_paths_outside_prefix() {
        let root = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(root.path(), "images");

        for path in ["images/../secret.txt", "/etc/passwd", "other/a.png"] {
            let err = storage.delete(path).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{path}");
        }
    }
}
