//! Batch orchestration: per-document jobs, failure isolation, progress,
//! and the final archive hand-off.

mod dataset;

pub use dataset::{FlattenedDataset, PageRow};

use crate::archive::{ArchiveBuilder, Artifact, ArtifactKind};
use crate::engine::{check_byte_limit, sheet, DocumentInput, ParsingEngine};
use crate::error::{Error, Result};
use crate::extract::{export_model_tables, export_sheets, write_artifact};
use crate::model::PageRecord;
use crate::render::{
    to_annotated_text, to_html, to_markdown, to_record, RecordFormat, RenderOptions,
};
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::{Seek, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Lifecycle state of a document job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Queued, working directory not yet created
    Pending,
    /// Being processed
    Processing,
    /// All requested artifacts written (possibly with warnings)
    Completed,
    /// The adapter could not produce a model, or an artifact could not
    /// be persisted
    Failed,
}

/// The per-document unit of work.
///
/// A job owns its working directory exclusively and is never mutated
/// after it reaches a terminal state.
#[derive(Debug)]
pub struct DocumentJob {
    /// Original input file name
    pub name: String,

    /// Sanitized stem keying the working directory
    pub stem: String,

    /// Working directory holding this job's artifacts
    pub dir: PathBuf,

    /// Current lifecycle state
    pub state: JobState,

    /// Artifacts written, tagged with their kind at creation time
    pub artifacts: Vec<Artifact>,

    /// Recoverable problems (failed tables, failed renderings)
    pub warnings: Vec<String>,

    /// Non-fatal notes from the adapter (e.g. truncation)
    pub notes: Vec<String>,

    /// Failure cause, set when the job fails
    pub failure: Option<String>,
}

impl DocumentJob {
    fn new(name: &str, stem: &str, dir: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            stem: stem.to_string(),
            dir,
            state: JobState::Pending,
            artifacts: Vec::new(),
            warnings: Vec::new(),
            notes: Vec::new(),
            failure: None,
        }
    }

    /// Check if the job completed.
    pub fn is_completed(&self) -> bool {
        self.state == JobState::Completed
    }

    /// Check if the job failed.
    pub fn is_failed(&self) -> bool {
        self.state == JobState::Failed
    }

    fn fail(&mut self, cause: String) {
        self.state = JobState::Failed;
        self.failure = Some(cause);
    }
}

/// Progress observer: called with `(completed_count, total_count)` after
/// each job leaves `Processing`. Advisory telemetry only.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Result of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// All jobs, in input order, each in a terminal state
    pub jobs: Vec<DocumentJob>,

    /// The flattened dataset, when enabled
    pub dataset: Option<FlattenedDataset>,

    /// When the run started
    pub started: DateTime<Utc>,

    /// When the run finished
    pub finished: DateTime<Utc>,
}

impl BatchReport {
    /// Completed jobs, in input order.
    pub fn completed(&self) -> impl Iterator<Item = &DocumentJob> {
        self.jobs.iter().filter(|j| j.is_completed())
    }

    /// Failed jobs, in input order.
    pub fn failed(&self) -> impl Iterator<Item = &DocumentJob> {
        self.jobs.iter().filter(|j| j.is_failed())
    }

    /// Number of completed jobs.
    pub fn completed_count(&self) -> usize {
        self.completed().count()
    }

    /// Number of failed jobs.
    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    /// Write the batch archive for every completed job.
    ///
    /// Runs strictly after the batch's join point; failed jobs
    /// contribute nothing. An error here is fatal for the whole run.
    pub fn write_archive<W: Write + Seek>(&self, writer: W) -> Result<W> {
        if self.jobs.iter().any(|j| j.state == JobState::Processing) {
            return Err(Error::Archive(
                "archive requested while a job is still processing".into(),
            ));
        }
        let mut builder = ArchiveBuilder::new(writer);
        for job in self.completed() {
            builder.add_job(&job.stem, &job.dir, &job.artifacts)?;
        }
        builder.finish()
    }
}

/// Walks the batch: one job per input, isolated failures, progress
/// reporting, and optional flattened-dataset accumulation.
pub struct BatchOrchestrator {
    engine: Arc<dyn ParsingEngine>,
    settings: Settings,
    out_root: PathBuf,
    progress: Option<ProgressCallback>,
}

impl BatchOrchestrator {
    /// Create an orchestrator writing job directories under `out_root`.
    pub fn new(
        engine: Arc<dyn ParsingEngine>,
        settings: Settings,
        out_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            engine,
            settings,
            out_root: out_root.into(),
            progress: None,
        }
    }

    /// Attach a progress observer.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Process every input and return the report.
    ///
    /// Jobs run in parallel; each works only inside its own directory,
    /// and the report is assembled after all of them reach a terminal
    /// state. A single unreadable input fails its own job and nothing
    /// else.
    pub fn run(&self, inputs: &[DocumentInput]) -> Result<BatchReport> {
        let started = Utc::now();
        fs::create_dir_all(&self.out_root)?;

        let stems = unique_stems(inputs);
        let total = inputs.len();
        let (tx, rx) = crossbeam_channel::unbounded::<()>();

        let outcomes: Vec<JobOutcome> = std::thread::scope(|scope| {
            let progress = self.progress.as_deref();
            let reporter = scope.spawn(move || {
                let mut completed = 0usize;
                while rx.recv().is_ok() {
                    completed += 1;
                    if let Some(callback) = progress {
                        callback(completed, total);
                    }
                }
            });

            let outcomes: Vec<JobOutcome> = inputs
                .par_iter()
                .zip(stems.par_iter())
                .map(|(input, stem)| {
                    let outcome = self.process_one(input, stem);
                    let _ = tx.send(());
                    outcome
                })
                .collect();

            drop(tx);
            let _ = reporter.join();
            outcomes
        });

        let mut jobs = Vec::with_capacity(outcomes.len());
        let mut dataset = self
            .settings
            .emit_flattened_dataset
            .then(FlattenedDataset::new);
        for outcome in outcomes {
            if let Some(ref mut dataset) = dataset {
                if outcome.job.is_completed() {
                    dataset.append_job(&outcome.job.name, &outcome.pages);
                }
            }
            jobs.push(outcome.job);
        }

        for job in jobs.iter().filter(|j| j.is_failed()) {
            log::error!(
                "job '{}' failed: {}",
                job.name,
                job.failure.as_deref().unwrap_or("unknown cause")
            );
        }

        Ok(BatchReport {
            jobs,
            dataset,
            started,
            finished: Utc::now(),
        })
    }

    /// Process every input and write the archive in one call.
    pub fn run_to_archive<W: Write + Seek>(
        &self,
        inputs: &[DocumentInput],
        writer: W,
    ) -> Result<(BatchReport, W)> {
        let report = self.run(inputs)?;
        let writer = report.write_archive(writer)?;
        Ok((report, writer))
    }

    fn process_one(&self, input: &DocumentInput, stem: &str) -> JobOutcome {
        let dir = self.out_root.join(stem);
        let mut job = DocumentJob::new(&input.name, stem, dir.clone());

        job.state = JobState::Processing;
        if let Err(e) = fs::create_dir_all(&dir) {
            job.fail(format!("creating working directory: {e}"));
            return JobOutcome::failed(job);
        }

        match self.execute(input, &mut job) {
            Ok(pages) => {
                job.state = JobState::Completed;
                JobOutcome { job, pages }
            }
            Err(e) => {
                job.fail(e.to_string());
                JobOutcome::failed(job)
            }
        }
    }

    /// The sequential per-job pipeline. Any `Err` fails the whole job;
    /// recoverable problems land in the job's warning list instead.
    fn execute(&self, input: &DocumentInput, job: &mut DocumentJob) -> Result<Vec<PageRecord>> {
        let settings = &self.settings;

        // Spreadsheets bypass the document model entirely.
        if input.format.is_spreadsheet() {
            if !settings.extract_tables {
                job.notes
                    .push("table extraction disabled; spreadsheet skipped".into());
                return Ok(Vec::new());
            }
            check_byte_limit(input, settings)?;
            let sheets = sheet::read_sheets(&input.bytes)?;
            let artifacts = export_sheets(&job.stem, &sheets, &job.dir)?;
            job.artifacts.extend(artifacts);
            return Ok(Vec::new());
        }

        if !self.engine.supports(input.format) {
            return Err(Error::UnsupportedFormat(input.format.to_string()));
        }

        let mut model = self.engine.parse(input, &job.dir, settings)?;
        // The job directory is keyed by the deduplicated stem; keep the
        // model consistent with it so placeholder names line up.
        model.stem = job.stem.clone();
        job.notes.extend(model.notes.iter().cloned());

        if settings.extract_images {
            for image in &model.images {
                job.artifacts
                    .push(Artifact::new(&image.file_name, ArtifactKind::RasterImage));
            }
        }

        let render_options = RenderOptions::new()
            .with_image_ref_mode(settings.image_ref_mode)
            .with_image_dir(&job.dir);

        if settings.emit_structured_markup {
            match to_markdown(&model, &render_options) {
                Ok(markdown) => {
                    let file_name = format!("{}.md", job.stem);
                    write_artifact(&job.dir, &file_name, markdown.as_bytes())?;
                    job.artifacts
                        .push(Artifact::new(file_name, ArtifactKind::StructuredMarkup));
                }
                Err(e) => job.warnings.push(format!("markdown rendering: {e}")),
            }
            match to_html(&model, &render_options) {
                Ok(html) => {
                    let file_name = format!("{}.html", job.stem);
                    write_artifact(&job.dir, &file_name, html.as_bytes())?;
                    job.artifacts
                        .push(Artifact::new(file_name, ArtifactKind::HtmlMarkup));
                }
                Err(e) => job.warnings.push(format!("html rendering: {e}")),
            }
        }

        if settings.emit_machine_record {
            match to_record(&model, RecordFormat::Pretty) {
                Ok(record) => {
                    let file_name = format!("{}.json", job.stem);
                    write_artifact(&job.dir, &file_name, record.as_bytes())?;
                    job.artifacts
                        .push(Artifact::new(file_name, ArtifactKind::MachineRecord));
                }
                Err(e) => job.warnings.push(format!("record rendering: {e}")),
            }
        }

        if settings.emit_annotated_text {
            let text = to_annotated_text(&model);
            let file_name = format!("{}.txt", job.stem);
            write_artifact(&job.dir, &file_name, text.as_bytes())?;
            job.artifacts
                .push(Artifact::new(file_name, ArtifactKind::AnnotatedText));
        }

        if settings.extract_tables {
            let extracted = export_model_tables(&model, &job.dir)?;
            job.artifacts.extend(extracted.artifacts);
            job.warnings.extend(extracted.warnings);
        }

        Ok(if settings.emit_flattened_dataset {
            model.pages
        } else {
            Vec::new()
        })
    }
}

struct JobOutcome {
    job: DocumentJob,
    pages: Vec<PageRecord>,
}

impl JobOutcome {
    fn failed(job: DocumentJob) -> Self {
        Self {
            job,
            pages: Vec::new(),
        }
    }
}

/// Assign each input a working-directory stem, suffixing duplicates so
/// no two jobs share a directory.
fn unique_stems(inputs: &[DocumentInput]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let base = input.stem();
            let mut candidate = base.clone();
            let mut n = 1usize;
            while !used.insert(candidate.clone()) {
                n += 1;
                candidate = format!("{base}-{n}");
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InputFormat;

    fn input(name: &str) -> DocumentInput {
        DocumentInput::new(name, Vec::new(), InputFormat::Text)
    }

    #[test]
    fn test_unique_stems() {
        let inputs = vec![input("a.txt"), input("b.txt"), input("a.md")];
        assert_eq!(unique_stems(&inputs), vec!["a", "b", "a-2"]);
    }

    #[test]
    fn test_unique_stems_suffix_collision() {
        // A literal "a-2" input must not collide with a suffixed stem.
        let inputs = vec![input("a.md"), input("a.txt"), input("a-2.md")];
        assert_eq!(unique_stems(&inputs), vec!["a", "a-2", "a-2-2"]);
    }

    #[test]
    fn test_job_terminal_states() {
        let mut job = DocumentJob::new("a.txt", "a", PathBuf::from("/tmp/a"));
        assert_eq!(job.state, JobState::Pending);
        job.fail("boom".into());
        assert!(job.is_failed());
        assert_eq!(job.failure.as_deref(), Some("boom"));
    }
}
