//! File attachment inspection and constraint checks

use super::answers::FileAttachment;
use super::definition::{Element, ElementKind};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Reasons a file cannot be attached
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file question named '{0}'")]
    UnknownQuestion(String),
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not a regular file")]
    NotAFile { path: String },
    #[error("'{name}' has type {mime}; accepted types are {accepted}")]
    UnsupportedType {
        name: String,
        mime: String,
        accepted: String,
    },
    #[error("'{name}' is {size} bytes; the maximum is {max} bytes")]
    TooLarge { name: String, size: u64, max: u64 },
    #[error("the survey is already completed")]
    Completed,
}

/// MIME type from a file extension
pub fn mime_from_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Read a file's metadata into an attachment. Contents are never read.
pub fn inspect(path: &Path) -> Result<FileAttachment, UploadError> {
    let display = path.display().to_string();
    let metadata = fs::metadata(path).map_err(|source| UploadError::Io {
        path: display.clone(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(UploadError::NotAFile { path: display });
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(display);

    Ok(FileAttachment {
        name,
        mime: mime_from_path(path).to_string(),
        size: metadata.len(),
    })
}

/// Check an attachment against a file question's type and size limits
pub fn check_constraints(question: &Element, file: &FileAttachment) -> Result<(), UploadError> {
    let ElementKind::File { max_size, .. } = &question.kind else {
        return Err(UploadError::UnknownQuestion(question.name.clone()));
    };

    let accepted = question.accepted_types();
    if !accepted.is_empty() && !accepted.contains(&file.mime.as_str()) {
        return Err(UploadError::UnsupportedType {
            name: file.name.clone(),
            mime: file.mime.clone(),
            accepted: accepted.join(", "),
        });
    }

    if let Some(max) = max_size.filter(|max| file.size > *max) {
        return Err(UploadError::TooLarge {
            name: file.name.clone(),
            size: file.size,
            max,
        });
    }

    Ok(())
}
