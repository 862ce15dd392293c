use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::engine_debug;
use upscaler_core::UploadCandidate;

/// Media type a browser would declare for this file, from its extension.
/// Unknown extensions map to an empty type, which validation rejects.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "",
    }
}

/// Turn user paths into candidates. Paths that are not readable files are
/// reported as messages and left out of the batch.
pub fn candidates_from_paths(paths: &[PathBuf]) -> (Vec<UploadCandidate>, Vec<String>) {
    let mut candidates = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();

    for path in paths {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                let media_type = media_type_for(path);
                engine_debug!("Candidate {} ({} bytes, {:?})", name, meta.len(), media_type);
                candidates.push(UploadCandidate::new(name, meta.len(), media_type, path.clone()));
            }
            Ok(_) => errors.push(format!("{name}: Not a file.")),
            Err(err) => errors.push(format!("{name}: Cannot read file ({err}).")),
        }
    }

    (candidates, errors)
}
