use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::client::Backend;
use crate::error::{FolioError, Result};

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]+").expect("valid file name pattern"));
static REPEATED_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid underscore pattern"));

/// Replace runs of unsafe characters with `_`, then collapse repeated underscores.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced = INVALID_CHARS.replace_all(name, "_");
    REPEATED_UNDERSCORES.replace_all(&replaced, "_").into_owned()
}

/// Object path inside a bucket: `<unix millis>-<sanitized name>`.
pub fn storage_path(file_name: &str, millis: i64) -> String {
    format!("{millis}-{}", sanitize_file_name(file_name))
}

pub fn guess_content_type(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Upload a local file and return its public URL.
///
/// There is no collision check beyond the timestamp prefix, and nothing removes
/// the object if a later step fails.
pub async fn upload_file<B: Backend>(backend: &B, bucket: &str, file: &Path) -> Result<String> {
    let shown = file.display().to_string();

    if !file.is_file() {
        return Err(FolioError::FileNotFound(shown));
    }

    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let bytes = std::fs::read(file).map_err(|e| FolioError::FileRead {
        path: shown.clone(),
        source: e,
    })?;

    let path = storage_path(&filename, chrono::Utc::now().timestamp_millis());
    backend
        .upload(bucket, &path, bytes, guess_content_type(&filename))
        .await?;

    tracing::info!(bucket, path = %path, file = %shown, "uploaded");
    Ok(backend.public_url(bucket, &path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my logo (final).png"), "my_logo_final_.png");
        assert_eq!(sanitize_file_name("a__b___c.jpg"), "a_b_c.jpg");
        assert_eq!(sanitize_file_name("résumé 2024.pdf"), "r_sum_2024.pdf");
        assert_eq!(sanitize_file_name("plain-name_1.svg"), "plain-name_1.svg");
    }

    #[test]
    fn test_storage_path_prefixes_timestamp() {
        assert_eq!(
            storage_path("Hero Shot.webp", 1_700_000_000_123),
            "1700000000123-Hero_Shot.webp"
        );
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("logo.PNG"), "image/png");
        assert_eq!(guess_content_type("cv.pdf"), "application/pdf");
        assert_eq!(guess_content_type("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_upload_file_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("my logo.png");
        std::fs::write(&file, b"png-bytes").unwrap();

        let backend = FakeBackend::new();
        let url = upload_file(&backend, "logo", &file).await.unwrap();

        let uploads = backend.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "logo");
        assert!(uploads[0].1.ends_with("-my_logo.png"));
        assert_eq!(url, format!("fake://logo/{}", uploads[0].1));
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let backend = FakeBackend::new();
        let err = upload_file(&backend, "logo", Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, FolioError::FileNotFound(_)));
        assert!(backend.uploads().is_empty());
    }
}
