//! Process command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use seglex_engine::{DocumentReport, EngineError, Lexer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Embedded dictionary code
    #[arg(
        short = 'd',
        long = "builtin",
        value_name = "CODE",
        conflicts_with = "dictionary"
    )]
    pub builtin: Option<String>,

    /// Dictionary file (.toml or .json)
    #[arg(long, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Annotation type name attached to the spans
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: Option<String>,

    /// Drop compounds that end exactly at the end of a file
    #[arg(long)]
    pub no_flush: bool,

    /// Process files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads (implies --parallel)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One span per line with its offsets
    Text,
    /// JSON array of files with their spans
    Json,
    /// Markdown numbered lists
    Markdown,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting segmentation");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let lexer = self.build_lexer(&config)?;
        let files = resolve_patterns(&self.input)?;
        let format = self.output_format(&config)?;
        let mut formatter = self.create_formatter(format, files.len() > 1)?;

        let mut documents = files
            .iter()
            .map(|path| FileReader::read_text(path).map(|text| lexer.document(text)))
            .collect::<Result<Vec<_>>>()?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let reports = match self.thread_count(&config) {
            Some(threads) => {
                log::info!("Processing {} file(s) on {threads} threads", files.len());
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .context("Failed to create thread pool")?;
                pool.install(|| lexer.process_batch(&mut documents))
            }
            None => documents
                .iter_mut()
                .map(|document| lexer.process(document))
                .collect(),
        };

        let type_name = &lexer.config().type_name;
        for ((path, document), report) in files.iter().zip(&documents).zip(reports) {
            let name = path.display().to_string();
            let report: DocumentReport = report
                .map_err(|e| CliError::ProcessingError(format!("{name}: {e}")))?;

            formatter.begin_document(&name)?;
            for annotation in document.annotations_named(type_name) {
                formatter.format_span(&annotation.covered_text, annotation.span)?;
            }
            progress.file_completed(&FileReader::display_name(path), report.spans());
        }

        formatter.finish()?;
        progress.finish();

        let metrics = lexer.metrics();
        log::info!(
            "Segmented {} document(s) in {}ms",
            metrics.documents,
            metrics.cumulative.as_millis()
        );

        Ok(())
    }

    /// Build the lexer; flags override the configuration file
    fn build_lexer(&self, config: &CliConfig) -> Result<Lexer> {
        let processing = &config.processing;
        let type_name = self
            .type_name
            .clone()
            .unwrap_or_else(|| processing.type_name.clone());

        let mut builder = Lexer::builder()
            .type_name(type_name)
            .flush_trailing_compounds(!self.no_flush && processing.flush_trailing_compounds);

        builder = match (&self.dictionary, &self.builtin, &processing.dictionary_file) {
            (Some(path), _, _) => builder.dictionary_file(path),
            (None, Some(code), _) => builder.builtin_dictionary(code.as_str()),
            (None, None, Some(path)) => builder.dictionary_file(path),
            (None, None, None) => builder.builtin_dictionary(processing.dictionary.as_str()),
        };

        builder.build().map_err(|e| match e {
            EngineError::Bank(err) => CliError::DictionaryError(err.to_string()).into(),
            other => CliError::ConfigError(other.to_string()).into(),
        })
    }

    fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        let name = &config.output.default_format;
        OutputFormat::from_str(name, true)
            .map_err(|_| CliError::ConfigError(format!("unknown output format '{name}'")).into())
    }

    /// Worker count when processing in parallel, `None` for sequential
    fn thread_count(&self, config: &CliConfig) -> Option<usize> {
        let configured = Some(config.performance.worker_threads).filter(|&n| n > 0);
        match self.threads.or(configured) {
            Some(threads) => Some(threads.max(1)),
            None if self.parallel || config.performance.parallel => Some(num_cpus::get()),
            None => None,
        }
    }

    fn create_formatter(
        &self,
        format: OutputFormat,
        multiple_files: bool,
    ) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer).with_headers(multiple_files)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // Already initialized when commands run more than once in-process
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}
