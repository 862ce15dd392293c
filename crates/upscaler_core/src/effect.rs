use crate::{BatchId, Quality, UploadCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ProcessBatch {
        batch_id: BatchId,
        files: Vec<UploadCandidate>,
        quality: Quality,
    },
    SaveResult { name: String, upscaled: String },
}
