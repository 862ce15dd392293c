use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::save::encode_original;
use crate::upscale::Upscaler;
use crate::{
    BatchId, EngineEvent, FailureKind, FileProgress, FileReport, ImageFile, ProcessedImage,
    Stage, UpscaleError, UpscaleRequest,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Upscale `files` strictly one after another, in order.
///
/// A failing file is logged and reported in its slot; it never stops the
/// batch. Emits `FileCompleted` after each file and `BatchCompleted` at the
/// end, and returns the same reports that `BatchCompleted` carries.
pub async fn run_batch(
    upscaler: &dyn Upscaler,
    batch_id: BatchId,
    files: &[ImageFile],
    quality: &str,
    sink: &dyn ProgressSink,
) -> Vec<FileReport> {
    let total = files.len();
    engine_info!("Batch {} started: {} file(s), quality {}", batch_id, total, quality);

    let mut reports = Vec::with_capacity(total);
    for (index, file) in files.iter().enumerate() {
        let emit_stage = |stage: Stage| {
            sink.emit(EngineEvent::Progress(FileProgress {
                batch_id,
                index,
                total,
                stage,
            }));
        };

        let result = process_file(upscaler, file, quality, emit_stage).await;
        match &result {
            Ok(image) => engine_info!(
                "File {} processed successfully ({} base64 chars)",
                image.name,
                image.upscaled.len()
            ),
            Err(err) => engine_warn!("Error processing file {}: {}", file.name, err),
        }

        let report = FileReport {
            name: file.name.clone(),
            result,
        };
        sink.emit(EngineEvent::FileCompleted {
            batch_id,
            index,
            report: report.clone(),
        });
        reports.push(report);
    }

    let succeeded = reports.iter().filter(|r| r.result.is_ok()).count();
    engine_info!(
        "Batch {} finished: {}/{} succeeded",
        batch_id,
        succeeded,
        total
    );
    sink.emit(EngineEvent::BatchCompleted {
        batch_id,
        reports: reports.clone(),
    });
    reports
}

async fn process_file(
    upscaler: &dyn Upscaler,
    file: &ImageFile,
    quality: &str,
    emit_stage: impl Fn(Stage),
) -> Result<ProcessedImage, UpscaleError> {
    emit_stage(Stage::Reading);
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|err| UpscaleError::new(FailureKind::Io, format!("{:?}: {err}", file.path)))?;
    let original = encode_original(&bytes);
    engine_debug!("Read {} ({} bytes)", file.name, bytes.len());

    emit_stage(Stage::Preparing);
    let request = UpscaleRequest {
        file_name: file.name.clone(),
        media_type: file.media_type.clone(),
        bytes,
        quality: quality.to_string(),
    };
    upscaler.validate(&request)?;

    emit_stage(Stage::Submitting);
    let upscaled = upscaler.upscale(request).await?;

    emit_stage(Stage::Finalizing);
    Ok(ProcessedImage {
        name: file.name.clone(),
        original,
        upscaled,
    })
}
