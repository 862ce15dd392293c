use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("upscaled payload is not valid base64: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Base64 of raw file bytes, without a data-URI prefix.
pub fn encode_original(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode an upscaled payload, tolerating a leading `data:image/<subtype>;base64,`.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, SaveError> {
    let data = strip_data_uri_prefix(payload.trim());
    Ok(STANDARD.decode(data)?)
}

fn strip_data_uri_prefix(payload: &str) -> &str {
    let Some(rest) = payload.strip_prefix("data:image/") else {
        return payload;
    };
    let Some((subtype, data)) = rest.split_once(";base64,") else {
        return payload;
    };
    if !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_lowercase()) {
        data
    } else {
        payload
    }
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), SaveError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(SaveError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes decoded results into one output directory, atomically per file.
///
/// Files left by an earlier run are replaced. Within one saver, a name that
/// was already written gets a numbered variant (`x (1).png`) instead.
#[derive(Debug, Clone)]
pub struct ResultSaver {
    dir: PathBuf,
    written: HashSet<String>,
}

impl ResultSaver {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            written: HashSet::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode `upscaled` and store it under the original's file name.
    pub fn save(&mut self, name: &str, upscaled: &str) -> Result<PathBuf, SaveError> {
        let bytes = decode_payload(upscaled)?;
        let filename = self.unused_filename(name);
        let path = self.write(&filename, &bytes)?;
        self.written.insert(filename);
        Ok(path)
    }

    fn unused_filename(&self, name: &str) -> String {
        let base = output_filename(name);
        let mut candidate = base.clone();
        let mut n = 1;
        while self.written.contains(&candidate) {
            candidate = numbered_filename(&base, n);
            n += 1;
        }
        candidate
    }

    fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, SaveError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| SaveError::Io(e.error))?;
        Ok(target)
    }
}

/// Final path component of `name` with characters unsafe in file names replaced.
pub fn output_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&[' ', '.'][..]);
    if cleaned.is_empty() {
        "upscaled".to_string()
    } else {
        cleaned.to_string()
    }
}

fn numbered_filename(base: &str, n: usize) -> String {
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({n}).{ext}"),
        _ => format!("{base} ({n})"),
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}')
}
