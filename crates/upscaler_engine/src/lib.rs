//! Upscaler engine: sequential upload pipeline, endpoint client and result saving.
mod engine;
mod pipeline;
mod save;
mod types;
mod upscale;

pub use engine::EngineHandle;
pub use pipeline::{run_batch, ChannelProgressSink, ProgressSink};
pub use save::{decode_payload, encode_original, ensure_output_dir, output_filename, ResultSaver, SaveError};
pub use types::{
    BatchId, EngineEvent, FailureKind, FileProgress, FileReport, ImageFile, ProcessedImage, Stage,
    UpscaleError, UpscaleRequest,
};
pub use upscale::{ReqwestUpscaler, UpscaleSettings, Upscaler, DEFAULT_ENDPOINT, DEFAULT_HOST};
