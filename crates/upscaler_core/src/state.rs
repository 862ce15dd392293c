use crate::progress::{batch_progress, Quality, Stage};
use crate::view_model::{FailureRowView, ResultRowView, UploaderViewModel};

pub type BatchId = u64;

/// Paired encodings of one successfully upscaled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedResult {
    pub name: String,
    /// Base64 of the source bytes, without a data-URI prefix.
    pub original: String,
    /// Base64 exactly as returned by the endpoint.
    pub upscaled: String,
}

/// Outcome of one accepted file, kept in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Succeeded(ProcessedResult),
    Failed { name: String, reason: String },
}

impl FileOutcome {
    pub fn name(&self) -> &str {
        match self {
            FileOutcome::Succeeded(result) => &result.name,
            FileOutcome::Failed { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    quality: Quality,
    loading: bool,
    progress: f64,
    next_batch_id: BatchId,
    current_batch: Option<BatchId>,
    batch_total: usize,
    finished: Vec<FileOutcome>,
    outcomes: Vec<FileOutcome>,
    error: Option<String>,
    drag_depth: u32,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality(quality: Quality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_depth > 0
    }

    pub fn current_batch(&self) -> Option<BatchId> {
        self.current_batch
    }

    /// Outcomes of the last completed batch, one per accepted file.
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Successful results of the last completed batch, in input order.
    pub fn results(&self) -> Vec<&ProcessedResult> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                FileOutcome::Succeeded(result) => Some(result),
                FileOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn view(&self) -> UploaderViewModel {
        let results = self
            .results()
            .into_iter()
            .enumerate()
            .map(|(index, result)| ResultRowView {
                index,
                name: result.name.clone(),
                original_bytes: decoded_len(&result.original),
                upscaled_bytes: decoded_len(&result.upscaled),
            })
            .collect();
        let failures = self
            .outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                FileOutcome::Failed { name, reason } => Some(FailureRowView {
                    name: name.clone(),
                    reason: reason.clone(),
                }),
                FileOutcome::Succeeded(_) => None,
            })
            .collect();

        UploaderViewModel {
            loading: self.loading,
            progress: self.progress,
            quality: self.quality,
            is_dragging: self.is_dragging(),
            error: self.error.clone(),
            files_finished: self.finished.len(),
            files_total: self.batch_total,
            results,
            failures,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_quality(&mut self, quality: Quality) {
        if self.quality != quality {
            self.quality = quality;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, error: Option<String>) {
        if self.error != error {
            self.error = error;
            self.mark_dirty();
        }
    }

    pub(crate) fn drag_entered(&mut self) {
        self.drag_depth += 1;
        if self.drag_depth == 1 {
            self.mark_dirty();
        }
    }

    pub(crate) fn drag_left(&mut self) {
        if self.drag_depth == 0 {
            return;
        }
        self.drag_depth -= 1;
        if self.drag_depth == 0 {
            self.mark_dirty();
        }
    }

    pub(crate) fn drag_reset(&mut self) {
        if self.drag_depth > 0 {
            self.drag_depth = 0;
            self.mark_dirty();
        }
    }

    /// Starts a new batch, dropping the previous batch's results.
    pub(crate) fn begin_batch(&mut self, total: usize) -> BatchId {
        self.next_batch_id += 1;
        let batch_id = self.next_batch_id;
        self.current_batch = Some(batch_id);
        self.batch_total = total;
        self.loading = true;
        self.progress = 0.0;
        self.finished.clear();
        self.outcomes.clear();
        self.mark_dirty();
        batch_id
    }

    pub(crate) fn apply_progress(
        &mut self,
        batch_id: BatchId,
        index: usize,
        total: usize,
        stage: Stage,
    ) {
        if !self.is_current(batch_id) {
            return;
        }
        let next = batch_progress(index, total, stage);
        if next > self.progress {
            self.progress = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_file_finished(&mut self, batch_id: BatchId, outcome: FileOutcome) {
        if !self.is_current(batch_id) {
            return;
        }
        self.finished.push(outcome);
        self.mark_dirty();
    }

    pub(crate) fn complete_batch(&mut self, batch_id: BatchId, outcomes: Vec<FileOutcome>) {
        if !self.is_current(batch_id) {
            return;
        }
        self.outcomes = outcomes;
        self.finished.clear();
        self.current_batch = None;
        self.batch_total = 0;
        self.loading = false;
        self.progress = 0.0;
        self.mark_dirty();
    }

    fn is_current(&self, batch_id: BatchId) -> bool {
        self.loading && self.current_batch == Some(batch_id)
    }
}

/// Length of the bytes a standard base64 payload decodes to, ignoring a
/// leading `data:image/<subtype>;base64,` and any whitespace.
fn decoded_len(encoded: &str) -> usize {
    let digits = strip_data_uri_prefix(encoded.trim())
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b'=')
        .count();
    digits / 4 * 3 + (digits % 4).saturating_sub(1)
}

fn strip_data_uri_prefix(payload: &str) -> &str {
    payload
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .filter(|(subtype, _)| {
            !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_lowercase())
        })
        .map_or(payload, |(_, data)| data)
}

#[cfg(test)]
mod tests {
    use super::decoded_len;

    #[test]
    fn decoded_len_accounts_for_padding() {
        assert_eq!(decoded_len(""), 0);
        assert_eq!(decoded_len("YQ=="), 1);
        assert_eq!(decoded_len("YWI="), 2);
        assert_eq!(decoded_len("YWJj"), 3);
        assert_eq!(decoded_len("YWJjZA"), 4);
    }

    #[test]
    fn decoded_len_skips_data_uri_prefix_and_whitespace() {
        assert_eq!(decoded_len("data:image/png;base64,aGVsbG8="), 5);
        assert_eq!(decoded_len("aGVs\nbG8=\n"), 5);
    }
}
