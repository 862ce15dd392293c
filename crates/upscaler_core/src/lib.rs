//! Upscaler core: input validation and the pure uploader state machine.
mod effect;
mod intake;
mod msg;
mod progress;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use intake::{
    is_allowed_media_type, validate_files, UploadCandidate, ValidationOutcome,
    ALLOWED_MEDIA_TYPES, MAX_UPLOAD_BYTES,
};
pub use msg::Msg;
pub use progress::{batch_progress, Quality, Stage};
pub use state::{AppState, BatchId, FileOutcome, ProcessedResult};
pub use update::update;
pub use view_model::{FailureRowView, ResultRowView, UploaderViewModel};
