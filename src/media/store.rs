use crate::error::{Error, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const VIDEO_EXTS: &[&str] = &["mp4", "mov", "webm"];

/// A stored file: `url` is what clients fetch (served under /uploads),
/// `id` is the storage key used to delete the file later.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub url: String,
    pub id: String,
}

/// Local-disk upload store. Replacement is delete-old-then-store-new with
/// no rollback: a failed store after a successful delete loses the old
/// file. Accepted gap, documented in DESIGN.md.
#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    pub async fn store_image(
        &self,
        folder: &str,
        filename: &str,
        data: &Bytes,
    ) -> Result<StoredMedia> {
        let ext = file_ext(filename);
        if !IMAGE_EXTS.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!(
                "File type .{} is not allowed",
                ext
            )));
        }
        if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
            return Err(Error::BadRequest("Invalid JPEG file content".into()));
        }
        if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Err(Error::BadRequest("Invalid PNG file content".into()));
        }
        self.store(folder, &ext, data).await
    }

    pub async fn store_video(
        &self,
        folder: &str,
        filename: &str,
        data: &Bytes,
    ) -> Result<StoredMedia> {
        let ext = file_ext(filename);
        if !VIDEO_EXTS.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!(
                "File type .{} is not allowed",
                ext
            )));
        }
        self.store(folder, &ext, data).await
    }

    /// Remove a previously stored file. Missing files are not an error;
    /// the record pointing at them is already being replaced.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = self.resolve(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, folder: &str, ext: &str, data: &Bytes) -> Result<StoredMedia> {
        let id = format!("{}/{}.{}", folder, Uuid::new_v4(), ext);
        let path = self.resolve(&id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to write media file: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(StoredMedia {
            url: format!("{}/uploads/{}", self.base_url, id),
            id,
        })
    }

    fn resolve(&self, id: &str) -> Result<PathBuf> {
        if id.split('/').any(|part| part == "..") || id.starts_with('/') {
            return Err(Error::BadRequest("Invalid media id".into()));
        }
        Ok(self.root.join(id))
    }
}

fn file_ext(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> MediaStore {
        let root = std::env::temp_dir().join(format!("media-store-{}", Uuid::new_v4()));
        MediaStore::new(root, "")
    }

    #[tokio::test]
    async fn stores_and_deletes_png() {
        let store = temp_store();
        let data = Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]);
        let stored = store
            .store_image("talent_profiles/abc", "face.png", &data)
            .await
            .unwrap();
        assert!(stored.url.starts_with("/uploads/talent_profiles/abc/"));
        assert!(stored.id.ends_with(".png"));
        assert!(store.root.join(&stored.id).exists());

        store.delete(&stored.id).await.unwrap();
        assert!(!store.root.join(&stored.id).exists());
    }

    #[tokio::test]
    async fn delete_of_missing_file_is_ok() {
        let store = temp_store();
        store.delete("talent_profiles/abc/gone.png").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_unknown_image_extension() {
        let store = temp_store();
        let data = Bytes::from_static(b"not an image");
        let err = store
            .store_image("x", "payload.exe", &data)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_mismatched_jpeg_content() {
        let store = temp_store();
        let data = Bytes::from_static(b"plain text");
        let err = store.store_image("x", "face.jpg", &data).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_path_traversal_ids() {
        let store = temp_store();
        let err = store.delete("../../etc/passwd").await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }
}
