use crate::intake::validate_files;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSubmitted(candidates) => {
            // The drop target is hidden while a batch runs; late submissions are dropped.
            if state.is_loading() || candidates.is_empty() {
                return (state, Vec::new());
            }

            let outcome = validate_files(candidates);
            if outcome.rejected.is_empty() {
                state.set_error(None);
            } else {
                state.set_error(Some(outcome.rejected.join("\n")));
            }
            if outcome.accepted.is_empty() {
                return (state, Vec::new());
            }

            let batch_id = state.begin_batch(outcome.accepted.len());
            vec![Effect::ProcessBatch {
                batch_id,
                files: outcome.accepted,
                quality: state.quality(),
            }]
        }
        Msg::QualitySelected(quality) => {
            state.set_quality(quality);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.set_error(None);
            Vec::new()
        }
        Msg::DragEntered => {
            state.drag_entered();
            Vec::new()
        }
        Msg::DragLeft => {
            state.drag_left();
            Vec::new()
        }
        Msg::Dropped => {
            state.drag_reset();
            Vec::new()
        }
        Msg::FileProgress {
            batch_id,
            index,
            total,
            stage,
        } => {
            state.apply_progress(batch_id, index, total, stage);
            Vec::new()
        }
        Msg::FileFinished { batch_id, outcome } => {
            state.apply_file_finished(batch_id, outcome);
            Vec::new()
        }
        Msg::BatchComplete { batch_id, outcomes } => {
            state.complete_batch(batch_id, outcomes);
            Vec::new()
        }
        Msg::DownloadRequested { index } => match state.results().get(index) {
            Some(result) => vec![Effect::SaveResult {
                name: result.name.clone(),
                upscaled: result.upscaled.clone(),
            }],
            None => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
