//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/studybuddy/config.toml)
//! 3. Project config (.studybuddy/config.toml)
//! 4. Environment variables (STUDYBUDDY_* prefix, `__` between keys)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{Result, StudyError};

const APP_DIR: &str = "studybuddy";
const PROJECT_DIR: &str = ".studybuddy";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "STUDYBUDDY_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_with_project(&Self::project_config_path())
    }

    /// Same as [`ConfigLoader::load`] with an explicit project config file
    pub fn load_with_project(project_path: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(project_path));
        }

        // e.g. STUDYBUDDY_PIPELINE__MAX_CHUNK_WORDS -> pipeline.max_chunk_words
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| StudyError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| StudyError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// `$XDG_<var>` if set, else `$HOME/<fallback>`, joined with the app dir
    fn xdg_dir(var: &str, fallback: &str) -> Option<PathBuf> {
        env::var(var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(fallback))
            })
            .map(|p| p.join(APP_DIR))
    }

    /// Get path to global config directory (~/.config/studybuddy/)
    pub fn global_dir() -> Option<PathBuf> {
        Self::xdg_dir("XDG_CONFIG_HOME", ".config")
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Get path to global data directory (~/.local/share/studybuddy/),
    /// home of the tokenizer resources
    pub fn global_data_dir() -> Option<PathBuf> {
        Self::xdg_dir("XDG_DATA_HOME", ".local/share")
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join(CONFIG_FILE)
    }

    /// Get project settings directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(PROJECT_DIR)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        if let Some(data) = Self::global_data_dir() {
            let exists = if data.exists() { "✓" } else { "✗" };
            println!("  Data:    {} {}", exists, data.display());
        }
    }

    /// Render a configuration as TOML or JSON
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| StudyError::Config(e.to_string()))
        }
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;
        println!("{}", Self::render(&config, as_json)?);
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            StudyError::Config("Cannot determine global config directory".to_string())
        })?;

        Self::write_config(&global_dir, Self::default_global_config(), force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration in `.studybuddy/`
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        Self::write_config(&project_dir, Self::default_project_config(), force)?;
        Ok(project_dir)
    }

    /// Write `content` to `<dir>/config.toml`, keeping an existing file unless `force`
    fn write_config(dir: &Path, content: &str, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() || force {
            fs::write(&config_path, content)?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Default global config content (TOML)
    fn default_global_config() -> &'static str {
        r#"# StudyBuddy Global Configuration
# User-wide defaults. Project settings in .studybuddy/config.toml override these.

version = "1.0"

# Generative provider shared by both transforms
[llm]
provider = "ollama"
model = "llama3:latest"
timeout_secs = 300
temperature = 0.0
# api_base = "http://localhost:11434"

[simplify]
max_length = 512

[summarize]
max_length = 142

[pipeline]
max_chunk_words = 300
num_flashcards = 5
"#
    }

    /// Default project config content (TOML)
    fn default_project_config() -> &'static str {
        r#"# StudyBuddy Project Configuration
# Settings for this directory that override global defaults.

version = "1.0"

[pipeline]
max_chunk_words = 300
num_flashcards = 5
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file_merges_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[pipeline]\nnum_flashcards = 3\n\n[summarize]\nmodel = \"mistral\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();

        assert_eq!(config.pipeline.num_flashcards, 3);
        assert_eq!(config.pipeline.max_chunk_words, 300);
        assert_eq!(config.summarize.model.as_deref(), Some("mistral"));
        assert_eq!(config.summarize.max_length, 142);
    }

    #[test]
    fn test_load_from_file_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[llm]\ntemperature = 5.0\n").unwrap();

        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert!(matches!(err, StudyError::Config(_)));
    }

    #[test]
    fn test_default_templates_parse() {
        let temp_dir = TempDir::new().unwrap();

        for content in [
            ConfigLoader::default_global_config(),
            ConfigLoader::default_project_config(),
        ] {
            let path = temp_dir.path().join("config.toml");
            fs::write(&path, content).unwrap();
            let config = ConfigLoader::load_from_file(&path).unwrap();
            assert_eq!(config.version, "1.0");
        }
    }

    #[test]
    fn test_write_config_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(PROJECT_DIR);

        let path = ConfigLoader::write_config(&dir, "version = \"1.0\"\n", false).unwrap();
        fs::write(&path, "# edited\n").unwrap();

        ConfigLoader::write_config(&dir, "version = \"1.0\"\n", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# edited\n");

        ConfigLoader::write_config(&dir, "version = \"1.0\"\n", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"1.0\"\n");
    }

    #[test]
    fn test_render_formats() {
        let config = Config::default();

        let toml = ConfigLoader::render(&config, false).unwrap();
        assert!(toml.contains("[pipeline]"));

        let json = ConfigLoader::render(&config, true).unwrap();
        assert!(json.contains("\"max_chunk_words\": 300"));
    }

    #[test]
    fn test_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("none.toml");

        // SAFETY: This test runs in isolation
        unsafe {
            std::env::set_var("STUDYBUDDY_PIPELINE__NUM_FLASHCARDS", "7");
        }
        let config = ConfigLoader::load_with_project(&missing);
        unsafe {
            std::env::remove_var("STUDYBUDDY_PIPELINE__NUM_FLASHCARDS");
        }

        assert_eq!(config.unwrap().pipeline.num_flashcards, 7);
    }
}
