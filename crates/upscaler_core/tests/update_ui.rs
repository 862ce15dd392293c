use upscaler_core::{
    update, AppState, Effect, FileOutcome, Msg, ProcessedResult, Quality, UploadCandidate,
};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn state_with_results(names: &[&str]) -> AppState {
    let files = names
        .iter()
        .map(|name| UploadCandidate::new(*name, 1024, "image/png", format!("/in/{name}")))
        .collect();
    let (state, effects) = update(AppState::new(), Msg::FilesSubmitted(files));
    let batch_id = match effects.as_slice() {
        [Effect::ProcessBatch { batch_id, .. }] => *batch_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let outcomes = names
        .iter()
        .map(|name| {
            FileOutcome::Succeeded(ProcessedResult {
                name: name.to_string(),
                original: "AAAA".to_string(),
                upscaled: format!("{name}-upscaled"),
            })
        })
        .collect();
    let (state, _) = update(state, Msg::BatchComplete { batch_id, outcomes });
    state
}

#[test]
fn nested_drag_events_keep_dragging_until_outermost_leave() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DragEntered);
    let (state, _) = update(state, Msg::DragEntered);
    let (state, _) = update(state, Msg::DragLeft);
    assert!(state.is_dragging());

    let (state, _) = update(state, Msg::DragLeft);
    assert!(!state.is_dragging());

    // Extra leave events must not underflow.
    let (state, _) = update(state, Msg::DragLeft);
    assert!(!state.is_dragging());
}

#[test]
fn drop_clears_drag_state() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DragEntered);
    let (state, _) = update(state, Msg::DragEntered);
    let (mut state, _) = update(state, Msg::Dropped);

    assert!(!state.view().is_dragging);
    assert!(state.consume_dirty());
}

#[test]
fn quality_toggle_marks_dirty_only_on_change() {
    init_logging();
    let mut state = AppState::new();
    assert_eq!(state.quality(), Quality::X2);

    let (mut state2, _) = update(state.clone(), Msg::QualitySelected(Quality::X2));
    assert!(!state2.consume_dirty());

    let (mut state3, _) = update(state2, Msg::QualitySelected(Quality::X4));
    assert_eq!(state3.view().quality, Quality::X4);
    assert!(state3.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn dismissing_error_clears_it() {
    init_logging();
    let bad = UploadCandidate::new("x.bmp", 10, "image/bmp", "/in/x.bmp");
    let (state, _) = update(AppState::new(), Msg::FilesSubmitted(vec![bad]));
    assert!(state.error().is_some());

    let (state, _) = update(state, Msg::ErrorDismissed);
    assert_eq!(state.error(), None);
}

#[test]
fn new_submission_clears_previous_error() {
    init_logging();
    let bad = UploadCandidate::new("x.bmp", 10, "image/bmp", "/in/x.bmp");
    let good = UploadCandidate::new("y.png", 10, "image/png", "/in/y.png");
    let (state, _) = update(AppState::new(), Msg::FilesSubmitted(vec![bad]));
    let (state, effects) = update(state, Msg::FilesSubmitted(vec![good]));

    assert_eq!(state.error(), None);
    assert_eq!(effects.len(), 1);
}

#[test]
fn download_emits_save_effect_for_result() {
    init_logging();
    let state = state_with_results(&["a.png", "b.webp"]);

    let (_, effects) = update(state, Msg::DownloadRequested { index: 1 });
    assert_eq!(
        effects,
        vec![Effect::SaveResult {
            name: "b.webp".to_string(),
            upscaled: "b.webp-upscaled".to_string(),
        }]
    );
}

#[test]
fn download_out_of_range_is_ignored() {
    init_logging();
    let state = state_with_results(&["a.png"]);

    let (state, effects) = update(state, Msg::DownloadRequested { index: 3 });
    assert!(effects.is_empty());
    assert_eq!(state.results().len(), 1);
}
