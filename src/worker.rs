//! The photo organiser worker.
//!
//! Runs the three independent operations against the configured sources:
//!
//! ```text
//! thumbnail   photo      →  <stem>.thumb.jpg      (EXIF thumbnail, unchanged bytes)
//! resize-gif  animation  →  <stem>.resized.gif    (coalesced, 200px wide)
//! resize-png  still      →  <stem>.100x100.png    (aspect ratio ignored)
//! ```
//!
//! The operations share nothing. [`Worker::run`] executes all of them, records
//! each outcome in a [`RunReport`] and keeps going when one fails, so a
//! missing sample file does not hide the results of the others.
//!
//! Progress is reported through an optional channel of [`WorkerEvent`]s,
//! drained by the CLI's printer thread.

use crate::config::{ConfigError, WorkerConfig};
use crate::imaging::{
    self, BackendError, ExifProfile, GeneratedOutput, ImageBackend, RustBackend,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name of the JSON report written into the output directory.
pub const REPORT_FILE_NAME: &str = "report.json";

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

/// The operations the worker knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    Thumbnail,
    ResizeGif,
    ResizePng,
}

impl JobKind {
    pub const ALL: [JobKind; 3] = [JobKind::Thumbnail, JobKind::ResizeGif, JobKind::ResizePng];

    pub fn label(self) -> &'static str {
        match self {
            JobKind::Thumbnail => "thumbnail",
            JobKind::ResizeGif => "resize-gif",
            JobKind::ResizePng => "resize-png",
        }
    }
}

/// How a single job ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum JobOutcome {
    Written { output: GeneratedOutput },
    /// Thumbnail job only: the photo has no EXIF thumbnail.
    NoThumbnail,
    Failed { error: String },
}

impl JobOutcome {
    /// Whether the job failed; a missing thumbnail is not a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, JobOutcome::Failed { .. })
    }
}

/// One entry of a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub job: JobKind,
    pub source: PathBuf,
    #[serde(flatten)]
    pub outcome: JobOutcome,
}

/// Outcome of [`Worker::run`], serialised to `report.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub jobs: Vec<JobReport>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.outcome.is_failed())
            .count()
    }

    pub fn succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Progress events, for the CLI printer.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    JobStarted { job: JobKind, source: PathBuf },
    JobFinished(JobReport),
}

/// Runs the configured operations with an [`ImageBackend`].
pub struct Worker<B: ImageBackend = RustBackend> {
    backend: B,
    config: WorkerConfig,
    events: Option<Sender<WorkerEvent>>,
}

impl Worker<RustBackend> {
    pub fn new(config: WorkerConfig) -> Self {
        Self::with_backend(RustBackend::new(), config)
    }
}

impl<B: ImageBackend> Worker<B> {
    /// Build a worker on a specific backend (allows testing with mock).
    pub fn with_backend(backend: B, config: WorkerConfig) -> Self {
        Self {
            backend,
            config,
            events: None,
        }
    }

    /// Send progress events to `tx`.
    pub fn with_events(mut self, tx: Sender<WorkerEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output.dir
    }

    fn emit(&self, event: WorkerEvent) {
        if let Some(tx) = &self.events {
            // Receiver gone means nobody is printing; the work itself continues
            let _ = tx.send(event);
        }
    }

    fn ensure_source(source: &Path) -> Result<(), WorkerError> {
        if !source.exists() {
            return Err(WorkerError::SourceNotFound(source.to_path_buf()));
        }
        Ok(())
    }

    fn ensure_output_dir(&self) -> Result<(), WorkerError> {
        std::fs::create_dir_all(self.output_dir())?;
        Ok(())
    }

    /// Configured source for `job`.
    pub fn source_for(&self, job: JobKind) -> &Path {
        match job {
            JobKind::Thumbnail => &self.config.sources.photo,
            JobKind::ResizeGif => &self.config.sources.animation,
            JobKind::ResizePng => &self.config.sources.still,
        }
    }

    /// Read the EXIF profile of `source`.
    pub fn exif_profile(&self, source: &Path) -> Result<Option<ExifProfile>, WorkerError> {
        Self::ensure_source(source)?;
        Ok(imaging::read_exif(&self.backend, source)?)
    }

    /// Extract the EXIF thumbnail of `source` into the output directory.
    pub fn extract_thumbnail(
        &self,
        source: &Path,
    ) -> Result<Option<GeneratedOutput>, WorkerError> {
        Self::ensure_source(source)?;
        self.ensure_output_dir()?;
        let written = imaging::extract_thumbnail(&self.backend, source, self.output_dir())?;
        match &written {
            Some(out) => info!("thumbnail {} -> {}", source.display(), out.path.display()),
            None => warn!("{} has no EXIF thumbnail", source.display()),
        }
        Ok(written)
    }

    /// Coalesce the animation at `source` and resize it to 200px wide.
    pub fn resize_animation(&self, source: &Path) -> Result<GeneratedOutput, WorkerError> {
        Self::ensure_source(source)?;
        self.ensure_output_dir()?;
        let out = imaging::resize_animation(&self.backend, source, self.output_dir())?;
        info!(
            "animation {} -> {} ({}x{}, {} frames)",
            source.display(),
            out.path.display(),
            out.width,
            out.height,
            out.frames.unwrap_or(0)
        );
        Ok(out)
    }

    /// Resize the still at `source` to exactly 100x100.
    pub fn resize_still(&self, source: &Path) -> Result<GeneratedOutput, WorkerError> {
        Self::ensure_source(source)?;
        self.ensure_output_dir()?;
        let out = imaging::resize_still(&self.backend, source, self.output_dir())?;
        info!(
            "still {} -> {} ({}x{})",
            source.display(),
            out.path.display(),
            out.width,
            out.height
        );
        Ok(out)
    }

    /// Run one job against `source`, turning errors into a failed outcome.
    pub fn run_job(&self, job: JobKind, source: &Path) -> JobReport {
        self.emit(WorkerEvent::JobStarted {
            job,
            source: source.to_path_buf(),
        });
        debug!("{} starting on {}", job.label(), source.display());

        let result = match job {
            JobKind::Thumbnail => self.extract_thumbnail(source).map(|written| match written {
                Some(output) => JobOutcome::Written { output },
                None => JobOutcome::NoThumbnail,
            }),
            JobKind::ResizeGif => self
                .resize_animation(source)
                .map(|output| JobOutcome::Written { output }),
            JobKind::ResizePng => self
                .resize_still(source)
                .map(|output| JobOutcome::Written { output }),
        };

        let outcome = result.unwrap_or_else(|e| {
            warn!("{} failed on {}: {}", job.label(), source.display(), e);
            JobOutcome::Failed {
                error: e.to_string(),
            }
        });

        let report = JobReport {
            job,
            source: source.to_path_buf(),
            outcome,
        };
        self.emit(WorkerEvent::JobFinished(report.clone()));
        report
    }

    /// Run every job on its configured source, in order.
    pub fn run(&self) -> RunReport {
        let jobs = JobKind::ALL
            .iter()
            .map(|&job| self.run_job(job, self.source_for(job)))
            .collect();

        RunReport {
            output_dir: self.output_dir().to_path_buf(),
            jobs,
        }
    }

    /// Write `report` as pretty JSON into the output directory.
    pub fn write_report(&self, report: &RunReport) -> Result<PathBuf, WorkerError> {
        self.ensure_output_dir()?;
        let path = self.output_dir().join(REPORT_FILE_NAME);
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
