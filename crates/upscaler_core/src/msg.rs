use crate::{BatchId, FileOutcome, Quality, Stage, UploadCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User dropped or picked a batch of files.
    FilesSubmitted(Vec<UploadCandidate>),
    /// User toggled the upscale factor.
    QualitySelected(Quality),
    /// User dismissed the validation error block.
    ErrorDismissed,
    /// A drag entered the drop target (may nest).
    DragEntered,
    /// A drag left the drop target.
    DragLeft,
    /// Files were dropped; ends any drag in progress.
    Dropped,
    /// Engine entered a stage for file `index` of `total`.
    FileProgress {
        batch_id: BatchId,
        index: usize,
        total: usize,
        stage: Stage,
    },
    /// Engine finished one file, successfully or not.
    FileFinished {
        batch_id: BatchId,
        outcome: FileOutcome,
    },
    /// Engine attempted every file of the batch.
    BatchComplete {
        batch_id: BatchId,
        outcomes: Vec<FileOutcome>,
    },
    /// User asked to save the result at `index` of the result list.
    DownloadRequested { index: usize },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
