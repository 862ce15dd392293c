use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_error, engine_info};
use upscaler_core::{Effect, FileOutcome, Msg, ProcessedResult, Stage, UploadCandidate};
use upscaler_engine::{
    EngineEvent, EngineHandle, FileReport, ImageFile, ResultSaver, UpscaleSettings,
};

pub struct EffectRunner {
    engine: EngineHandle,
    saver: ResultSaver,
    saved: Vec<PathBuf>,
}

impl EffectRunner {
    pub fn new(settings: UpscaleSettings, output_dir: PathBuf) -> Self {
        Self::with_engine(EngineHandle::new(settings), output_dir)
    }

    pub fn with_engine(engine: EngineHandle, output_dir: PathBuf) -> Self {
        Self {
            engine,
            saver: ResultSaver::new(output_dir),
            saved: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.saver.dir()
    }

    /// Paths written by `SaveResult` effects so far.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProcessBatch {
                    batch_id,
                    files,
                    quality,
                } => {
                    engine_info!(
                        "ProcessBatch batch_id={} files={} quality={}",
                        batch_id,
                        files.len(),
                        quality
                    );
                    let files = files.into_iter().map(to_image_file).collect();
                    self.engine.process_batch(batch_id, files, quality.as_str());
                }
                Effect::SaveResult { name, upscaled } => match self.saver.save(&name, &upscaled) {
                    Ok(path) => {
                        engine_info!("Saved {} to {:?}", name, path);
                        self.saved.push(path);
                    }
                    Err(err) => engine_error!("Failed to save {}: {}", name, err),
                },
            }
        }
    }

    /// Blocks for the next engine event and translates it into a message.
    /// `None` means the engine has stopped.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }
}

fn to_image_file(candidate: UploadCandidate) -> ImageFile {
    ImageFile {
        name: candidate.name,
        media_type: candidate.media_type,
        path: candidate.source,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::FileProgress {
            batch_id: progress.batch_id,
            index: progress.index,
            total: progress.total,
            stage: map_stage(progress.stage),
        },
        EngineEvent::FileCompleted {
            batch_id, report, ..
        } => Msg::FileFinished {
            batch_id,
            outcome: map_report(report),
        },
        EngineEvent::BatchCompleted { batch_id, reports } => Msg::BatchComplete {
            batch_id,
            outcomes: reports.into_iter().map(map_report).collect(),
        },
    }
}

fn map_report(report: FileReport) -> FileOutcome {
    match report.result {
        Ok(image) => FileOutcome::Succeeded(ProcessedResult {
            name: image.name,
            original: image.original,
            upscaled: image.upscaled,
        }),
        Err(err) => {
            engine_debug!("File {} failed: {}", report.name, err);
            FileOutcome::Failed {
                name: report.name,
                reason: err.to_string(),
            }
        }
    }
}

fn map_stage(stage: upscaler_engine::Stage) -> Stage {
    match stage {
        upscaler_engine::Stage::Reading => Stage::Reading,
        upscaler_engine::Stage::Preparing => Stage::Preparing,
        upscaler_engine::Stage::Submitting => Stage::Submitting,
        upscaler_engine::Stage::Finalizing => Stage::Finalizing,
    }
}
