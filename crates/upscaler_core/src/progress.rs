/// Pipeline stage of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Preparing,
    Submitting,
    Finalizing,
}

impl Stage {
    /// Percentage of one file's share reached once this stage is entered.
    pub fn weight(self) -> u32 {
        match self {
            Stage::Reading => 20,
            Stage::Preparing => 40,
            Stage::Submitting => 70,
            Stage::Finalizing => 100,
        }
    }
}

/// Batch-wide completion in [0, 100] for file `index` (0-based) of `total`.
pub fn batch_progress(index: usize, total: usize, stage: Stage) -> f64 {
    if total == 0 {
        return 0.0;
    }
    // (index / total) * 100 + weight / total, over a single division so the
    // last stage of the last file lands exactly on 100.
    let numerator = index as f64 * 100.0 + f64::from(stage.weight());
    (numerator / total as f64).clamp(0.0, 100.0)
}

/// Upscale factor offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    #[default]
    X2,
    X4,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::X2 => "2x",
            Quality::X4 => "4x",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2x" | "2" => Ok(Quality::X2),
            "4x" | "4" => Ok(Quality::X4),
            other => Err(format!("unknown quality {other:?}, expected 2x or 4x")),
        }
    }
}
