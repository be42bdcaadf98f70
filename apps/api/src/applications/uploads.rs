//! Resume files attached to applications.
//!
//! Only the stored file name reaches the database. Files land flat in the
//! configured upload directory under a UUID-prefixed, sanitised name.

use std::path::Path;

use anyhow::Context;
use uuid::Uuid;

use crate::errors::AppError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Extension after the last dot, compared case-insensitively.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}

/// Reduces a client-supplied file name to a safe basename.
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = basename
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c),
            '.' | '-' | '_' => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Validates and writes a resume, returning the stored file name.
pub async fn save_resume(dir: &Path, filename: &str, data: &[u8]) -> Result<String, AppError> {
    if !allowed_file(filename) {
        return Err(AppError::Validation(format!(
            "Invalid file type. Allowed types: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    // Sanitising can strip the extension off names like "..pdf".
    let safe = sanitize_filename(filename)
        .filter(|name| allowed_file(name))
        .ok_or_else(|| AppError::Validation("Invalid resume file name".to_string()))?;
    let stored = format!("{}_{}", Uuid::new_v4(), safe);

    tokio::fs::write(dir.join(&stored), data)
        .await
        .with_context(|| format!("failed to write resume {stored}"))?;

    Ok(stored)
}

/// Best-effort removal of a resume whose application was never stored.
pub async fn discard_resume(dir: &Path, stored: &str) {
    if let Err(e) = tokio::fs::remove_file(dir.join(stored)).await {
        tracing::warn!("Failed to remove orphaned resume {stored}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(allowed_file("resume.pdf"));
        assert!(allowed_file("Resume.DOCX"));
        assert!(allowed_file("notes.final.txt"));
        assert!(!allowed_file("resume.doc"));
        assert!(!allowed_file("resume.pdf.exe"));
        assert!(!allowed_file("pdf"));
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(
            sanitize_filename("../../etc/passwd.txt").as_deref(),
            Some("passwd.txt")
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\ada\\My Resume.pdf").as_deref(),
            Some("My_Resume.pdf")
        );
    }

    #[test]
    fn test_sanitize_drops_leading_dots_and_symbols() {
        assert_eq!(sanitize_filename("..hidden$.txt").as_deref(), Some("hidden.txt"));
        assert_eq!(sanitize_filename("../"), None);
    }

    #[tokio::test]
    async fn test_save_resume_writes_prefixed_file() {
        let dir = tempfile::tempdir().unwrap();
        let stored = save_resume(dir.path(), "cv.pdf", b"%PDF-1.4").await.unwrap();

        assert!(stored.ends_with("_cv.pdf"));
        let written = tokio::fs::read(dir.path().join(&stored)).await.unwrap();
        assert_eq!(written, b"%PDF-1.4");

        discard_resume(dir.path(), &stored).await;
        assert!(!dir.path().join(&stored).exists());
    }

    #[tokio::test]
    async fn test_save_resume_rejects_name_that_loses_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["..pdf", "cv/.pdf", "...txt"] {
            let err = save_resume(dir.path(), name, b"%PDF-1.4").await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{name} accepted");
        }
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_resume_rejects_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_resume(dir.path(), "cv.exe", b"MZ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
