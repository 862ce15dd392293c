use std::path::PathBuf;

use clap::Parser;
use upscaler_core::Quality;

#[derive(Parser, Debug)]
#[command(name = "upscaler", about = "Upscale images through a remote upscaling API")]
pub struct Cli {
    /// Images to upscale (PNG, JPEG or WebP, at most 5MB each)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// API credential for the upscaling service
    #[arg(long, env = "AI_IMAGE_UPSCALER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upscale factor: 2x or 4x
    #[arg(short, long)]
    pub quality: Option<Quality>,

    /// Directory receiving the upscaled images [default: ./upscaled]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// RON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only upscale; do not write results to disk
    #[arg(long)]
    pub no_save: bool,

    /// Also write logs to ./upscaler.log
    #[arg(long)]
    pub log_file: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
