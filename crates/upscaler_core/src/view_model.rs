use crate::Quality;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploaderViewModel {
    pub loading: bool,
    /// Batch-wide completion in [0, 100].
    pub progress: f64,
    pub quality: Quality,
    pub is_dragging: bool,
    pub error: Option<String>,
    pub files_finished: usize,
    pub files_total: usize,
    pub results: Vec<ResultRowView>,
    pub failures: Vec<FailureRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub index: usize,
    pub name: String,
    pub original_bytes: usize,
    pub upscaled_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRowView {
    pub name: String,
    pub reason: String,
}
