use std::fmt;
use std::path::PathBuf;

pub type BatchId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Preparing,
    Submitting,
    Finalizing,
}

/// An accepted image queued for upscaling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub media_type: String,
    pub path: PathBuf,
}

/// Packaged payload for one endpoint call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaleRequest {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub quality: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub name: String,
    pub original: String,
    pub upscaled: String,
}

/// Result of one file, positionally matching the batch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub name: String,
    pub result: Result<ProcessedImage, UpscaleError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProgress {
    pub batch_id: BatchId,
    pub index: usize,
    pub total: usize,
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(FileProgress),
    FileCompleted {
        batch_id: BatchId,
        index: usize,
        report: FileReport,
    },
    BatchCompleted {
        batch_id: BatchId,
        reports: Vec<FileReport>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaleError {
    pub kind: FailureKind,
    pub message: String,
}

impl UpscaleError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for UpscaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for UpscaleError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Io,
    InvalidRequest,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    MissingResult,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Io => write!(f, "io error"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::MissingResult => write!(f, "response has no result_base64"),
        }
    }
}
