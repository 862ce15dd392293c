use std::path::PathBuf;

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Media types the upscaling endpoint accepts.
pub const ALLOWED_MEDIA_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// A user-supplied file awaiting validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub name: String,
    pub size: u64,
    pub media_type: String,
    /// Where the pipeline reads the bytes from.
    pub source: PathBuf,
}

impl UploadCandidate {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        media_type: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationOutcome {
    pub accepted: Vec<UploadCandidate>,
    pub rejected: Vec<String>,
}

/// Partition a batch into accepted candidates and rejection messages.
///
/// The media type is checked first; a candidate with a disallowed type is not
/// checked against the size ceiling. Both output sequences keep input order.
pub fn validate_files(candidates: Vec<UploadCandidate>) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for candidate in candidates {
        if !is_allowed_media_type(&candidate.media_type) {
            outcome.rejected.push(format!(
                "{}: Invalid format. Only PNG, JPG, JPEG, and WebP are supported.",
                candidate.name
            ));
            continue;
        }

        if candidate.size > MAX_UPLOAD_BYTES {
            let size_mb = candidate.size as f64 / (1024.0 * 1024.0);
            outcome.rejected.push(format!(
                "{}: File too large ({size_mb:.2}MB). Maximum size is 5MB.",
                candidate.name
            ));
            continue;
        }

        outcome.accepted.push(candidate);
    }

    outcome
}

pub fn is_allowed_media_type(media_type: &str) -> bool {
    ALLOWED_MEDIA_TYPES.contains(&media_type)
}
