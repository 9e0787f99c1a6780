//! Generate Command
//!
//! Reads study text, runs the study pipeline and renders the result.
//!
//! Usage:
//!   studybuddy generate --input notes.txt
//!   studybuddy generate --text "..." --format json
//!   cat notes.txt | studybuddy generate --reveal

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::ai::ModelCache;
use crate::cli::render::{StudyRenderer, render_plain};
use crate::cli::ui::Output;
use crate::config::{ConfigLoader, ConfigOverrides};
use crate::study::StudyPipeline;
use crate::types::{Result, StudyAids, StudyError};

/// Generate run options (consolidated parameters)
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Read study text from this file
    pub input: Option<PathBuf>,
    /// Study text given directly
    pub text: Option<String>,
    /// Command-line config overrides
    pub overrides: ConfigOverrides,
    /// Print JSON instead of the text report
    pub json: bool,
    /// Print answers inline instead of prompting
    pub reveal: bool,
}

/// Run the generate command
pub async fn run(options: GenerateOptions) -> Result<()> {
    let input = read_input(&options)?;
    let output = Output::new();

    if input.trim().is_empty() {
        output.warning(&StudyError::EmptyInput.to_string());
        return Ok(());
    }

    let mut config = ConfigLoader::load()?;
    config.apply_overrides(&options.overrides);
    config.validate()?;
    debug!("Effective config: {:?}", config);

    let pipeline = StudyPipeline::from_config(&config, ModelCache::global()).await?;
    info!(
        "Generating study aids with {} ({} words per chunk)",
        config.llm.provider, config.pipeline.max_chunk_words
    );

    let aids = match pipeline.run(&input).await {
        Ok(aids) => aids,
        Err(StudyError::EmptyInput) => {
            output.warning(&StudyError::EmptyInput.to_string());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    present(&aids, &options)
}

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Json,
    /// Unstyled text with answers inline, for pipes and files
    Plain,
    /// Styled text, answers optionally behind a prompt
    Terminal,
}

impl Report {
    fn select(json: bool, stdout_is_terminal: bool) -> Self {
        match (json, stdout_is_terminal) {
            (true, _) => Self::Json,
            (false, false) => Self::Plain,
            (false, true) => Self::Terminal,
        }
    }
}

fn present(aids: &StudyAids, options: &GenerateOptions) -> Result<()> {
    match Report::select(options.json, std::io::stdout().is_terminal()) {
        Report::Json => println!("{}", serde_json::to_string_pretty(aids)?),
        Report::Plain => print!("{}", render_plain(aids)),
        Report::Terminal => StudyRenderer::new(options.reveal).render(aids)?,
    }
    Ok(())
}

/// Study text from `--text`, `--input`, or standard input
fn read_input(options: &GenerateOptions) -> Result<String> {
    if let Some(text) = &options.text {
        return Ok(text.clone());
    }

    if let Some(path) = &options.input {
        debug!("Reading study text from {}", path.display());
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        Output::new().info("Paste your study text, then press Ctrl-D:");
    }

    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_text_option_wins() {
        let options = GenerateOptions {
            text: Some("Inline text.".to_string()),
            input: Some(PathBuf::from("/does/not/exist")),
            ..Default::default()
        };
        assert_eq!(read_input(&options).unwrap(), "Inline text.");
    }

    #[test]
    fn test_reads_input_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "Photosynthesis turns light into energy.").unwrap();

        let options = GenerateOptions {
            input: Some(path),
            ..Default::default()
        };
        assert_eq!(
            read_input(&options).unwrap(),
            "Photosynthesis turns light into energy."
        );
    }

    #[test]
    fn test_missing_input_file_is_io_error() {
        let options = GenerateOptions {
            input: Some(PathBuf::from("/does/not/exist/notes.txt")),
            ..Default::default()
        };
        assert!(matches!(read_input(&options), Err(StudyError::Io(_))));
    }

    #[test]
    fn test_report_selection() {
        assert_eq!(Report::select(true, true), Report::Json);
        assert_eq!(Report::select(true, false), Report::Json);
        assert_eq!(Report::select(false, false), Report::Plain);
        assert_eq!(Report::select(false, true), Report::Terminal);
    }

    #[tokio::test]
    async fn test_blank_text_is_a_warning_not_an_error() {
        let options = GenerateOptions {
            text: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(run(options).await.is_ok());
    }
}
