//! Tokenizer Resources
//!
//! The sentence splitter needs an abbreviation list so that "Dr. Smith" or
//! "e.g. this" does not end a sentence. The list lives on disk under the data
//! directory and can be edited by the user. When it is missing it is acquired
//! once (the bundled list is installed) before the first tokenization call.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::constants::tokenizer as tok_constants;
use crate::types::{Result, StudyError};

/// Abbreviations shipped with the binary
const BUNDLED_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "rev", "hon", "gen", "col",
    "capt", "lt", "sgt", "gov", "sen", "rep", "pres", "vs", "etc", "e.g", "i.e", "cf", "al",
    "approx", "ca", "inc", "ltd", "co", "corp", "dept", "est", "fig", "figs", "no", "nos",
    "vol", "vols", "pp", "ed", "eds", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "u.s", "u.k", "u.n", "a.m", "p.m", "ph.d", "b.c", "a.d",
];

/// Loaded linguistic resources for the sentence splitter
#[derive(Debug, Clone)]
pub struct TokenizerResources {
    abbreviations: HashSet<String>,
}

impl Default for TokenizerResources {
    fn default() -> Self {
        Self::bundled()
    }
}

impl TokenizerResources {
    /// Resources built from the bundled abbreviation list, no disk access
    pub fn bundled() -> Self {
        Self {
            abbreviations: BUNDLED_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse an abbreviation list: one entry per line, `#` starts a comment,
    /// trailing periods and case are ignored
    pub fn from_list(content: &str) -> Self {
        let abbreviations = content
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default().trim())
            .filter(|line| !line.is_empty())
            .map(normalize_abbreviation)
            .collect();
        Self { abbreviations }
    }

    /// Load resources from `data_dir`, acquiring them once if missing
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::resource_path(data_dir);

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loaded tokenizer resources from {}", path.display());
                return Ok(Self::from_list(&content));
            }
            Err(e) => {
                warn!(
                    "Tokenizer resources not found at {} ({}), acquiring",
                    path.display(),
                    e
                );
            }
        }

        Self::acquire(&path).map_err(|e| StudyError::TokenizerResources {
            path: path.clone(),
            message: format!("acquisition failed: {}", e),
        })?;

        let content =
            fs::read_to_string(&path).map_err(|e| StudyError::TokenizerResources {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok(Self::from_list(&content))
    }

    /// Location of the abbreviation list under a data directory
    pub fn resource_path(data_dir: &Path) -> PathBuf {
        data_dir
            .join(tok_constants::RESOURCE_DIR)
            .join(tok_constants::ABBREVIATIONS_FILE)
    }

    /// Whether `word` (without its trailing period) is a known abbreviation
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&normalize_abbreviation(word))
    }

    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }

    fn acquire(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = String::from("# Abbreviations that do not end a sentence\n");
        for abbreviation in BUNDLED_ABBREVIATIONS {
            content.push_str(abbreviation);
            content.push('\n');
        }
        fs::write(path, content)?;

        info!("Installed tokenizer resources: {}", path.display());
        Ok(())
    }
}

fn normalize_abbreviation(word: &str) -> String {
    word.trim_end_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_contains_common_titles() {
        let resources = TokenizerResources::bundled();
        assert!(resources.is_abbreviation("Dr."));
        assert!(resources.is_abbreviation("e.g."));
        assert!(resources.is_abbreviation("U.S"));
        assert!(!resources.is_abbreviation("cat"));
    }

    #[test]
    fn test_from_list_ignores_comments_and_case() {
        let resources = TokenizerResources::from_list("# header\nAbbr.\n\n  xyz # trailing\n");
        assert_eq!(resources.len(), 2);
        assert!(resources.is_abbreviation("abbr"));
        assert!(resources.is_abbreviation("XYZ."));
    }

    #[test]
    fn test_load_acquires_missing_resources_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = TokenizerResources::resource_path(temp_dir.path());
        assert!(!path.exists());

        let resources = TokenizerResources::load(temp_dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(resources.len(), BUNDLED_ABBREVIATIONS.len());
    }

    #[test]
    fn test_load_reads_user_edited_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = TokenizerResources::resource_path(temp_dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "thm\n").unwrap();

        let resources = TokenizerResources::load(temp_dir.path()).unwrap();
        assert_eq!(resources.len(), 1);
        assert!(resources.is_abbreviation("Thm."));
    }

    #[test]
    fn test_load_fails_when_acquisition_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be
        let blocker = temp_dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();

        let err = TokenizerResources::load(&blocker).unwrap_err();
        assert!(matches!(err, StudyError::TokenizerResources { .. }));
    }
}
