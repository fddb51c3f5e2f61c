//! Run orchestration.
//!
//! A conversion walks `Parsing -> Loading -> Requesting -> Writing` and ends in
//! `Success` or `Failed`. Each state calls its component once; the only
//! branching is error propagation. Errors are reported here and nowhere else.

use crate::cli::Cli;
use crate::error::PseudogenError;

use common::ErrorLocation;

use pseudogen_core::config::{Environment, Settings};
use pseudogen_core::{
    ChatCompletionClient, Completer, ModelRegistry, SourceLoader, output, prompt,
};

use std::io::Write;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info};

pub const SUCCESS_EXIT_CODE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Parsing,
    Loading,
    Requesting,
    Writing,
    Success,
    Failed { category: &'static str },
}

impl DriverState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DriverState::Success | DriverState::Failed { .. })
    }
}

/// One conversion, as requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source: String,
    pub output: Option<PathBuf>,
    pub model: Option<String>,
}

impl Job {
    /// # Errors
    ///
    /// Returns [`PseudogenError::Validation`] if no source was given.
    #[track_caller]
    pub fn from_cli(cli: &Cli) -> Result<Self, PseudogenError> {
        let Some(source) = cli.source.clone() else {
            return Err(PseudogenError::Validation {
                message: String::from("a source file or URL is required"),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        Ok(Self {
            source,
            output: cli.output.clone(),
            model: cli.model.clone(),
        })
    }
}

pub struct Driver<C: Completer> {
    registry: ModelRegistry,
    loader: SourceLoader,
    completer: C,
    default_model: Option<String>,
    state: DriverState,
}

impl<C: Completer> Driver<C> {
    pub fn new(loader: SourceLoader, completer: C) -> Self {
        Self {
            registry: ModelRegistry::builtin(),
            loader,
            completer,
            default_model: None,
            state: DriverState::Parsing,
        }
    }

    /// Model used when the job names none (from the config file).
    pub fn with_default_model(mut self, model: Option<String>) -> Self {
        self.default_model = model;
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn completer(&self) -> &C {
        &self.completer
    }

    /// Run one conversion to a terminal state.
    ///
    /// Output is only written once a complete result is in hand.
    pub async fn convert<O: Write>(
        &mut self,
        job: &Job,
        stdout: &mut O,
    ) -> Result<(), PseudogenError> {
        let result = self.convert_inner(job, stdout).await;

        match &result {
            Ok(()) => self.transition(DriverState::Success),
            Err(e) => self.transition(DriverState::Failed {
                category: e.category(),
            }),
        }

        result
    }

    async fn convert_inner<O: Write>(
        &mut self,
        job: &Job,
        stdout: &mut O,
    ) -> Result<(), PseudogenError> {
        let requested = job.model.as_deref().or(self.default_model.as_deref());
        let model = self.registry.resolve_or_default(requested)?;

        self.transition(DriverState::Loading);
        let document = self.loader.load(&job.source).await?;
        let request = prompt::build(&document, model);

        self.transition(DriverState::Requesting);
        let result = self.completer.complete(&request).await?;

        self.transition(DriverState::Writing);
        output::write(&result, job.output.as_deref(), stdout)?;

        Ok(())
    }

    fn transition(&mut self, next: DriverState) {
        debug!("Driver state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Print the registry, one model per line, default marked with `*`.
pub fn list_models<O: Write>(
    registry: &ModelRegistry,
    stdout: &mut O,
) -> Result<(), PseudogenError> {
    let models = registry.list_all();
    let id_width = models.iter().map(|m| m.identifier.len()).max().unwrap_or(0);
    let name_width = models.iter().map(|m| m.display_name.len()).max().unwrap_or(0);

    for model in models {
        let marker = if registry.is_default(model) { '*' } else { ' ' };
        writeln!(
            stdout,
            "{marker} {:<id_width$}  {:<name_width$}  {}",
            model.identifier, model.display_name, model.description
        )
        .and_then(|_| stdout.flush())
        .map_err(|e| PseudogenError::Output {
            message: format!("Failed to write model list: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }

    Ok(())
}

/// Everything after argument parsing: list models, or resolve configuration
/// and run one conversion against the real provider.
pub async fn execute<O: Write>(
    cli: &Cli,
    env: &dyn Environment,
    stdout: &mut O,
) -> Result<(), PseudogenError> {
    if cli.list_models {
        return list_models(&ModelRegistry::builtin(), stdout);
    }

    let settings = Settings::resolve(cli.config.as_deref(), env)?;
    debug!("Settings: {:?}", settings);

    let job = Job::from_cli(cli)?;
    let completer = ChatCompletionClient::new(&settings)?;
    let loader = SourceLoader::new(settings.timeout)?;

    Driver::new(loader, completer)
        .with_default_model(settings.default_model.clone())
        .convert(&job, stdout)
        .await
}

/// Run and map the outcome to a process exit status, reporting failures on
/// `stderr`.
pub async fn run<O: Write, E: Write>(
    cli: &Cli,
    env: &dyn Environment,
    stdout: &mut O,
    stderr: &mut E,
) -> u8 {
    match execute(cli, env, stdout).await {
        Ok(()) => {
            info!("Done");
            SUCCESS_EXIT_CODE
        }
        Err(e) => report(&e, stderr),
    }
}

/// Print the one-line failure report and return the category's exit code.
///
/// The full record, with the source location, goes to the debug log only.
pub fn report<E: Write>(error: &PseudogenError, stderr: &mut E) -> u8 {
    debug!("{error}");
    let _ = writeln!(stderr, "error: {}", error.message());
    let _ = stderr.flush();
    error.exit_code()
}
