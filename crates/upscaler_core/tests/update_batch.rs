use std::sync::Once;

use pretty_assertions::assert_eq;
use upscaler_core::{
    update, AppState, BatchId, Effect, FileOutcome, Msg, ProcessedResult, Quality, Stage,
    UploadCandidate,
};

const MB: u64 = 1024 * 1024;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn candidate(name: &str, size: u64, media_type: &str) -> UploadCandidate {
    UploadCandidate::new(name, size, media_type, format!("/uploads/{name}"))
}

fn succeeded(name: &str) -> FileOutcome {
    FileOutcome::Succeeded(ProcessedResult {
        name: name.to_string(),
        original: "b3JpZ2luYWw=".to_string(),
        upscaled: format!("dXA{name}"),
    })
}

fn submit(state: AppState, files: Vec<UploadCandidate>) -> (AppState, BatchId, Vec<UploadCandidate>) {
    let (state, effects) = update(state, Msg::FilesSubmitted(files));
    match effects.as_slice() {
        [Effect::ProcessBatch {
            batch_id, files, ..
        }] => (state, *batch_id, files.clone()),
        other => panic!("expected a single ProcessBatch effect, got {other:?}"),
    }
}

fn run_stages(mut state: AppState, batch_id: BatchId, total: usize) -> (AppState, Vec<f64>) {
    let mut published = Vec::new();
    for index in 0..total {
        for stage in [
            Stage::Reading,
            Stage::Preparing,
            Stage::Submitting,
            Stage::Finalizing,
        ] {
            let (next, _) = update(
                state,
                Msg::FileProgress {
                    batch_id,
                    index,
                    total,
                    stage,
                },
            );
            state = next;
            published.push(state.progress());
        }
    }
    (state, published)
}

#[test]
fn mixed_batch_rejects_gif_and_oversized_jpeg() {
    init_logging();
    let files = vec![
        candidate("a.png", MB, "image/png"),
        candidate("b.gif", MB, "image/gif"),
        candidate("c.jpg", 6 * MB, "image/jpeg"),
    ];

    let (state, _batch_id, accepted) = submit(AppState::new(), files);

    assert_eq!(accepted, vec![candidate("a.png", MB, "image/png")]);
    assert_eq!(
        state.error(),
        Some(
            "b.gif: Invalid format. Only PNG, JPG, JPEG, and WebP are supported.\n\
             c.jpg: File too large (6.00MB). Maximum size is 5MB."
        )
    );
    assert!(state.is_loading());
}

#[test]
fn all_rejected_batch_is_not_submitted() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new(),
        Msg::FilesSubmitted(vec![candidate("notes.txt", 10, "text/plain")]),
    );

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert!(state.error().unwrap().starts_with("notes.txt: Invalid format"));
    assert!(state.consume_dirty());
}

#[test]
fn single_file_success_publishes_result_and_resets() {
    init_logging();
    let (state, batch_id, _) = submit(AppState::new(), vec![candidate("a.png", MB, "image/png")]);
    let (state, published) = run_stages(state, batch_id, 1);
    assert_eq!(published, vec![20.0, 40.0, 70.0, 100.0]);

    let result = ProcessedResult {
        name: "a.png".to_string(),
        original: "YS5wbmc=".to_string(),
        upscaled: "dXBzY2FsZWQ=".to_string(),
    };
    let (state, _) = update(
        state,
        Msg::BatchComplete {
            batch_id,
            outcomes: vec![FileOutcome::Succeeded(result.clone())],
        },
    );

    assert_eq!(state.results(), vec![&result]);
    assert_eq!(state.progress(), 0.0);
    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
}

#[test]
fn all_successes_keep_input_order_and_progress_is_monotonic() {
    init_logging();
    let names = ["one.png", "two.jpg", "three.webp"];
    let files = names
        .iter()
        .map(|name| candidate(name, MB, "image/png"))
        .collect();
    let (state, batch_id, _) = submit(AppState::new(), files);
    let (state, published) = run_stages(state, batch_id, names.len());

    assert!(published.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(published.last().copied(), Some(100.0));

    let outcomes = names.iter().map(|name| succeeded(name)).collect();
    let (state, _) = update(state, Msg::BatchComplete { batch_id, outcomes });

    let result_names: Vec<_> = state.results().into_iter().map(|r| r.name.as_str()).collect();
    assert_eq!(result_names, names.to_vec());
    assert_eq!(state.progress(), 0.0);
}

#[test]
fn failed_file_is_dropped_from_results_but_reported() {
    init_logging();
    let files = ["a.png", "b.png", "c.png"]
        .iter()
        .map(|name| candidate(name, MB, "image/png"))
        .collect();
    let (state, batch_id, _) = submit(AppState::new(), files);

    let outcomes = vec![
        succeeded("a.png"),
        FileOutcome::Failed {
            name: "b.png".to_string(),
            reason: "http status 500".to_string(),
        },
        succeeded("c.png"),
    ];
    let (state, _) = update(state, Msg::BatchComplete { batch_id, outcomes });

    let result_names: Vec<_> = state.results().into_iter().map(|r| r.name.as_str()).collect();
    assert_eq!(result_names, vec!["a.png", "c.png"]);
    let outcome_names: Vec<_> = state.outcomes().iter().map(FileOutcome::name).collect();
    assert_eq!(outcome_names, vec!["a.png", "b.png", "c.png"]);

    let view = state.view();
    assert_eq!(view.results.len(), 2);
    assert_eq!(view.failures.len(), 1);
    assert_eq!(view.failures[0].name, "b.png");
    assert_eq!(view.results[1].index, 1);
}

#[test]
fn submission_while_loading_is_ignored() {
    init_logging();
    let (state, batch_id, _) = submit(AppState::new(), vec![candidate("a.png", MB, "image/png")]);

    let (state, effects) = update(
        state,
        Msg::FilesSubmitted(vec![candidate("b.png", MB, "image/png")]),
    );
    assert!(effects.is_empty());
    assert_eq!(state.current_batch(), Some(batch_id));
}

#[test]
fn stale_batch_events_are_ignored() {
    init_logging();
    let (state, first, _) = submit(AppState::new(), vec![candidate("a.png", MB, "image/png")]);
    let (state, _) = update(
        state,
        Msg::BatchComplete {
            batch_id: first,
            outcomes: vec![succeeded("a.png")],
        },
    );
    let (state, second, _) = submit(state, vec![candidate("b.png", MB, "image/png")]);
    assert_ne!(first, second);
    assert!(state.results().is_empty());

    let (state, _) = update(
        state,
        Msg::FileProgress {
            batch_id: first,
            index: 0,
            total: 1,
            stage: Stage::Finalizing,
        },
    );
    assert_eq!(state.progress(), 0.0);

    let (state, _) = update(
        state,
        Msg::BatchComplete {
            batch_id: first,
            outcomes: vec![succeeded("stale.png")],
        },
    );
    assert!(state.is_loading());
    assert!(state.results().is_empty());
}

#[test]
fn file_finished_updates_live_counts() {
    init_logging();
    let files = vec![
        candidate("a.png", MB, "image/png"),
        candidate("b.png", MB, "image/png"),
    ];
    let (state, batch_id, _) = submit(AppState::new(), files);
    let (state, _) = update(
        state,
        Msg::FileFinished {
            batch_id,
            outcome: succeeded("a.png"),
        },
    );

    let view = state.view();
    assert_eq!(view.files_finished, 1);
    assert_eq!(view.files_total, 2);
    assert!(view.loading);
}

#[test]
fn quality_is_carried_into_the_batch() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::QualitySelected(Quality::X4));
    let (_, effects) = update(
        state,
        Msg::FilesSubmitted(vec![candidate("a.png", MB, "image/png")]),
    );

    assert!(matches!(
        effects.as_slice(),
        [Effect::ProcessBatch {
            quality: Quality::X4,
            ..
        }]
    ));
}

#[test]
fn result_sizes_ignore_data_uri_prefix() {
    init_logging();
    let (state, batch_id, _) = submit(AppState::new(), vec![candidate("a.png", MB, "image/png")]);
    let (state, _) = update(
        state,
        Msg::BatchComplete {
            batch_id,
            outcomes: vec![FileOutcome::Succeeded(ProcessedResult {
                name: "a.png".to_string(),
                original: "YQ==".to_string(),
                upscaled: "data:image/png;base64,aGVsbG8=".to_string(),
            })],
        },
    );

    let view = state.view();
    assert_eq!(view.results[0].original_bytes, 1);
    assert_eq!(view.results[0].upscaled_bytes, 5);
}
