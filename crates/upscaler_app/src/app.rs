use anyhow::Result;
use engine_logging::{engine_info, engine_warn, LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;
use upscaler_core::{update, AppState, Msg, UploadCandidate};

use crate::cli::Cli;
use crate::config::{self, RunConfig};
use crate::effects::EffectRunner;
use crate::intake::candidates_from_paths;
use crate::render::Renderer;

pub fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = if cli.log_file {
        LogDestination::Both(DEFAULT_LOG_FILE.into())
    } else {
        LogDestination::Terminal
    };
    engine_logging::initialize(destination, level);

    let config = config::resolve(&cli)?;
    engine_info!("Resolved settings: {:?}", config.settings);

    let (candidates, intake_errors) = candidates_from_paths(&cli.files);
    for error in &intake_errors {
        eprintln!("{error}");
    }

    let RunConfig {
        settings,
        quality,
        output_dir,
        save,
    } = config;
    let mut app = App::new(
        AppState::with_quality(quality),
        EffectRunner::new(settings, output_dir),
    );
    app.process(candidates);
    app.renderer.print_summary(&app.state.view());

    if save {
        let written = app.download_all();
        if written > 0 {
            println!(
                "Saved {} image(s) to {}",
                written,
                app.runner.output_dir().display()
            );
        }
    }

    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            renderer: Renderer::new(),
        }
    }

    /// Submit one batch and pump engine events until it has completed.
    fn process(&mut self, candidates: Vec<UploadCandidate>) {
        self.dispatch(Msg::FilesSubmitted(candidates));
        while self.state.is_loading() {
            match self.runner.next_msg() {
                Some(msg) => self.dispatch(msg),
                None => {
                    engine_warn!("Engine stopped before the batch completed");
                    break;
                }
            }
        }
    }

    /// Request a download for every result. Returns the number of files written.
    fn download_all(&mut self) -> usize {
        let before = self.runner.saved().len();
        for index in 0..self.state.results().len() {
            self.dispatch(Msg::DownloadRequested { index });
        }
        self.runner.saved().len() - before
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.renderer.render(&state.view());
        }
        self.state = state;
        self.runner.run(effects);
    }
}
