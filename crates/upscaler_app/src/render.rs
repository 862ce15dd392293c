use indicatif::{ProgressBar, ProgressStyle};
use upscaler_core::UploaderViewModel;

/// Terminal view of the uploader: a progress bar while loading, then a summary.
#[derive(Default)]
pub struct Renderer {
    bar: Option<ProgressBar>,
    shown_error: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &UploaderViewModel) {
        if view.error != self.shown_error {
            if let Some(error) = &view.error {
                self.println(&format!("Some files were skipped:\n{error}"));
            }
            self.shown_error = view.error.clone();
        }

        if view.loading {
            let bar = self.bar.get_or_insert_with(new_bar);
            bar.set_position(view.progress.round() as u64);
            bar.set_message(format!(
                "{}/{} files, {} quality",
                view.files_finished, view.files_total, view.quality
            ));
        } else if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    pub fn print_summary(&self, view: &UploaderViewModel) {
        for line in summary_lines(view) {
            println!("{line}");
        }
    }

    fn println(&self, text: &str) {
        match &self.bar {
            Some(bar) => bar.println(text),
            None => eprintln!("{text}"),
        }
    }
}

fn new_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template(
        "{spinner:.green} Upscaling [{bar:40.cyan/blue}] {pos:>3}% {msg}",
    )
    .map(|style| style.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

pub fn summary_lines(view: &UploaderViewModel) -> Vec<String> {
    if view.results.is_empty() && view.failures.is_empty() {
        return Vec::new();
    }
    if view.results.is_empty() {
        let mut lines = vec!["No images were upscaled.".to_string()];
        lines.extend(failure_lines(view));
        return lines;
    }

    let mut lines = vec!["Before & after:".to_string()];
    for row in &view.results {
        lines.push(format!(
            "  {:>2}. {}  {} -> {}",
            row.index + 1,
            row.name,
            format_size(row.original_bytes),
            format_size(row.upscaled_bytes)
        ));
    }
    lines.extend(failure_lines(view));
    lines
}

fn failure_lines(view: &UploaderViewModel) -> impl Iterator<Item = String> + '_ {
    view.failures
        .iter()
        .map(|row| format!("  failed: {} ({})", row.name, row.reason))
}

fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes >= KB * KB {
        format!("{:.2}MB", bytes / (KB * KB))
    } else if bytes >= KB {
        format!("{:.1}KB", bytes / KB)
    } else {
        format!("{bytes}B")
    }
}
