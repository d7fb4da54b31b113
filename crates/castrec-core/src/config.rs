use serde::{Deserialize, Serialize};

use crate::types::ContainerFormat;

/// Fallback artifact name used when the caller confirms with an empty label.
pub const DEFAULT_LABEL: &str = "screen-audio-recording";

/// Recorder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    pub format: ContainerFormat,
    /// Artifact base name when the user supplies no label.
    #[serde(alias = "defaultLabel")]
    pub default_label: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            format: ContainerFormat::Webm,
            default_label: DEFAULT_LABEL.to_owned(),
        }
    }
}

impl RecorderConfig {
    /// Artifact file name for a user-supplied label.
    ///
    /// Whitespace-only labels fall back to `default_label`.
    pub fn artifact_name(&self, label: &str) -> String {
        let base = label.trim();
        let base = if base.is_empty() { self.default_label.as_str() } else { base };
        format!("{}.{}", base, self.format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{ "format": "webm", "defaultLabel": "capture" }"#;
        let cfg: RecorderConfig = serde_json::from_str(json).expect("valid camelCase config");
        assert_eq!(cfg.default_label, "capture");
        assert_eq!(cfg.format, ContainerFormat::Webm);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: RecorderConfig = serde_json::from_str("{}").expect("all fields defaulted");
        assert_eq!(cfg, RecorderConfig::default());
        assert_eq!(cfg.default_label, DEFAULT_LABEL);
    }

    #[test]
    fn artifact_name_falls_back_on_empty_label() {
        let cfg = RecorderConfig::default();
        assert_eq!(cfg.artifact_name("demo"), "demo.webm");
        assert_eq!(cfg.artifact_name(""), "screen-audio-recording.webm");
        assert_eq!(cfg.artifact_name("   "), "screen-audio-recording.webm");
    }
}
