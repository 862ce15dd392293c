use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_error, engine_info};

use crate::pipeline::{run_batch, ChannelProgressSink};
use crate::upscale::{ReqwestUpscaler, UpscaleSettings, Upscaler};
use crate::{BatchId, EngineEvent, ImageFile};

enum EngineCommand {
    ProcessBatch {
        batch_id: BatchId,
        files: Vec<ImageFile>,
        quality: String,
    },
}

/// Background worker that runs batches one at a time.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: UpscaleSettings) -> Self {
        Self::with_upscaler(Arc::new(ReqwestUpscaler::new(settings)))
    }

    pub fn with_upscaler(upscaler: Arc<dyn Upscaler>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            // Each batch runs to completion before the next command is taken.
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, upscaler.as_ref(), command, &event_tx);
            }
            engine_info!("Engine command channel closed");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn process_batch(&self, batch_id: BatchId, files: Vec<ImageFile>, quality: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ProcessBatch {
            batch_id,
            files,
            quality: quality.into(),
        });
    }

    /// Blocks until the next event; `None` once the worker has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    upscaler: &dyn Upscaler,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::ProcessBatch {
            batch_id,
            files,
            quality,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            runtime.block_on(run_batch(upscaler, batch_id, &files, &quality, &sink));
        }
    }
}
