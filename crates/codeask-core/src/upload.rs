//! Upload candidates and client-side validation.
//!
//! A candidate exists only between the validate and submit steps; it is never
//! persisted. Validation runs entirely client-side and never reaches the
//! network layer.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CodeaskError, Result};

/// Upload size limit: 7 MiB.
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 7 * 1024 * 1024;

/// MIME types accepted for archive uploads.
pub const ALLOWED_ARCHIVE_TYPES: [&str; 2] = ["application/zip", "application/x-zip-compressed"];

/// A zip archive selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCandidate {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ZipCandidate {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A public GitHub repository selected for server-side cloning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubCandidate {
    pub url: String,
}

/// A candidate codebase source, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCandidate {
    Zip(ZipCandidate),
    Github(GithubCandidate),
}

/// Proof that a candidate passed client-side validation.
#[derive(Debug, Clone)]
pub struct ValidatedCandidate(UploadCandidate);

impl ValidatedCandidate {
    pub fn into_inner(self) -> UploadCandidate {
        self.0
    }

    pub fn candidate(&self) -> &UploadCandidate {
        &self.0
    }
}

/// Validates a candidate against size, type and URL-format constraints.
///
/// # Errors
///
/// - `FileTooLarge` when a zip exceeds [`MAX_UPLOAD_SIZE_BYTES`]
/// - `InvalidFileType` when the MIME type is not an accepted archive type
/// - `InvalidRepositoryUrl` when a GitHub URL does not match the accepted
///   pattern
pub fn validate(candidate: UploadCandidate) -> Result<ValidatedCandidate> {
    match &candidate {
        UploadCandidate::Zip(zip) => {
            if zip.size_bytes() > MAX_UPLOAD_SIZE_BYTES {
                return Err(CodeaskError::FileTooLarge {
                    size_bytes: zip.size_bytes(),
                });
            }
            if !ALLOWED_ARCHIVE_TYPES.contains(&zip.mime_type.as_str()) {
                return Err(CodeaskError::InvalidFileType {
                    mime_type: zip.mime_type.clone(),
                });
            }
        }
        UploadCandidate::Github(repo) => {
            if !is_valid_repository_url(&repo.url) {
                return Err(CodeaskError::InvalidRepositoryUrl {
                    url: repo.url.clone(),
                });
            }
        }
    }
    Ok(ValidatedCandidate(candidate))
}

/// Checks a URL against the accepted GitHub repository pattern:
/// `https?://[www.]github.com/<owner>/<repo>[/]`, with owner restricted to
/// word characters and hyphens and repo additionally allowing dots.
pub fn is_valid_repository_url(url: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^https?://(www\.)?github\.com/[\w-]+/[\w.-]+/?$")
            .expect("repository URL pattern is valid")
    });
    pattern.is_match(url)
}
