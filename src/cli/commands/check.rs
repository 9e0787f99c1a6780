//! Check Command
//!
//! Health-checks the providers behind both transforms.

use crate::ai::provider::create_provider;
use crate::cli::ui::Output;
use crate::config::{ConfigLoader, ConfigOverrides};
use crate::types::{Result, StudyError, TransformKind};

/// Check provider availability for simplify and summarize
pub async fn run(overrides: ConfigOverrides) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    config.apply_overrides(&overrides);
    config.validate()?;

    let output = Output::new();
    output.header("Provider check");

    let mut unavailable = Vec::new();
    for kind in [TransformKind::Simplify, TransformKind::Summarize] {
        let provider_config = config.provider_config(kind);
        let provider = create_provider(&provider_config)?;
        let label = format!("{} ({}: {})", kind, provider.name(), provider.model());

        match provider.health_check().await {
            Ok(true) => output.success(&label),
            Ok(false) => {
                output.error(&label);
                unavailable.push(kind.to_string());
            }
            Err(e) => {
                output.error(&format!("{}: {}", label, e));
                unavailable.push(kind.to_string());
            }
        }
    }

    if unavailable.is_empty() {
        Ok(())
    } else {
        Err(StudyError::LlmApi(format!(
            "Provider unavailable for: {}",
            unavailable.join(", ")
        )))
    }
}
