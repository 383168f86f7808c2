use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::glossary::{ChangeRecord, Glossary, GlossaryProcessor};

// @module: Application controller for glossary rewriting

/// Extension of the documents picked up in folder mode
pub const DOCUMENT_EXTENSION: &str = "tex";

/// Per-run switches coming from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Overwrite existing outputs (including the input itself)
    pub force_overwrite: bool,

    /// Compute and report, but write nothing
    pub dry_run: bool,
}

/// Outcome of processing one document
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Number of glossary terms discovered
    pub term_count: usize,

    /// Applied replacements, ascending by offset
    pub changes: Vec<ChangeRecord>,

    /// Whether the output file was written
    pub written: bool,
}

impl RunSummary {
    pub fn replacement_count(&self) -> usize {
        self.changes.len()
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Compiled extractor/rewriter pair
    processor: GlossaryProcessor,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let processor = GlossaryProcessor::new(config.markup.clone())?;

        Ok(Self { config, processor })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract the glossary of a document without rewriting it
    pub fn list_terms(&self, input_file: &Path) -> Result<Glossary> {
        let text = FileManager::read_to_string(input_file)?;
        Ok(self.processor.extract(&text))
    }

    /// Rewrite a single document
    ///
    /// The output defaults to `<stem>.<suffix>.<ext>` next to the input.
    pub fn run(
        &self,
        input_file: &Path,
        output_file: Option<&Path>,
        options: RunOptions,
    ) -> Result<RunSummary> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = match output_file {
            Some(path) => path.to_path_buf(),
            None => FileManager::generate_output_path(input_file, &self.config.output.suffix),
        };

        if Self::same_file(input_file, &output_path)
            && !options.force_overwrite
            && !options.dry_run
        {
            return Err(anyhow!(
                "Refusing to overwrite the input file {:?} (use -f to rewrite in place)",
                input_file
            ));
        }

        let text = FileManager::read_to_string(input_file)?;
        let (glossary, outcome) = self
            .processor
            .process(&text)
            .with_context(|| format!("Failed to rewrite {:?}", input_file))?;

        let mut summary = RunSummary {
            input: input_file.to_path_buf(),
            output: output_path,
            term_count: glossary.len(),
            changes: outcome.changes,
            written: false,
        };

        if glossary.is_empty() {
            warn!("No glossary definitions found in {:?}", input_file);
        }

        if options.dry_run {
            info!("Dry run, not writing {:?}", summary.output);
        } else if summary.output.exists()
            && !options.force_overwrite
            && !Self::same_file(input_file, &summary.output)
        {
            warn!(
                "Skipping file, output already exists (use -f to force overwrite): {:?}",
                summary.output
            );
        } else {
            FileManager::write_to_file(&summary.output, &outcome.text)?;
            summary.written = true;
        }

        self.log_summary(&summary);
        debug!("Processed {:?} in {:?}", input_file, start_time.elapsed());

        Ok(summary)
    }

    /// Rewrite every document under a directory, next to itself
    ///
    /// Files that already carry the output suffix are skipped. A failing file
    /// is reported and does not stop the run.
    pub fn run_folder(&self, input_dir: &Path, options: RunOptions) -> Result<Vec<RunSummary>> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let suffix = &self.config.output.suffix;
        let files: Vec<PathBuf> = FileManager::find_files(input_dir, DOCUMENT_EXTENSION)?
            .into_iter()
            .filter(|path| !FileManager::has_output_suffix(path, suffix))
            .collect();

        if files.is_empty() {
            warn!("No .{} files found in {:?}", DOCUMENT_EXTENSION, input_dir);
            return Ok(Vec::new());
        }

        info!("Processing {} document(s) in {:?}", files.len(), input_dir);

        let progress_bar = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);

        let mut summaries = Vec::with_capacity(files.len());
        let mut failures = 0;

        for path in &files {
            let file_name = path.file_name().unwrap_or_default().to_string_lossy();
            progress_bar.set_message(file_name.to_string());

            match self.run(path, None, options) {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    failures += 1;
                    progress_bar.suspend(|| error!("Error processing {:?}: {:#}", path, e));
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        let total: usize = summaries.iter().map(RunSummary::replacement_count).sum();
        info!(
            "Finished {} file(s): {} replacements, {} failure(s)",
            summaries.len(),
            total,
            failures
        );

        Ok(summaries)
    }

    /// Log term count, replacement count and a preview of the earliest replacements
    fn log_summary(&self, summary: &RunSummary) {
        info!("Found {} glossary terms.", summary.term_count);
        info!("Applied {} replacements.", summary.replacement_count());

        for change in Self::preview(&summary.changes, self.config.output.preview_limit) {
            info!("  - {}", change);
        }

        let hidden = summary.changes.len().saturating_sub(self.config.output.preview_limit);
        if hidden > 0 {
            info!("  ... and {} more", hidden);
        }

        if summary.written {
            info!("Updated file written to {:?}", summary.output);
        }
    }

    /// Preview lines for the first `limit` changes
    pub fn preview(changes: &[ChangeRecord], limit: usize) -> Vec<String> {
        changes
            .iter()
            .take(limit)
            .map(|c| format!("{} at position {} ({}:{})", c.name, c.offset, c.line, c.column))
            .collect()
    }

    fn same_file(a: &Path, b: &Path) -> bool {
        if a == b {
            return true;
        }
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
