//! Prompt pair attached to every analysis request.
//!
//! The defaults ask for a palm-appearance lifestyle observation report. The
//! wording is product content, so it lives in config and can be replaced
//! inline or from files without a rebuild.

use crate::config::PromptConfig;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Default system role persona.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
你是一位資深中醫與健康管理顧問，擅長以「手掌外觀」作生活型態觀察。
嚴格遵守：本結果僅供日常健康管理參考，非診斷；遇到紅腫、劇痛、麻木、傷口感染等情況要建議盡快求醫。
請以「重點觀察」「可能含意（非診斷）」「建議與待辦」三段輸出，語氣中立、具體可行。
避免敏感斷言（如確診某疾病、開藥），必要時提供可檢查的客觀指標（例如：肝功能、膽紅素、空腹血糖、鐵蛋白等）。";

/// Default user role instruction.
pub const DEFAULT_USER_PROMPT: &str = "\
請由上載的「手掌相片」出發，結合皮膚水份、掌色（紅、白、黃、紫暗）、肌丘（大魚際、中魚際等）、勞損跡象（繭、裂）、末梢循環等角度，給我一份條理清晰的中文報告。
若影像不清晰，請先給出「需要更清晰的拍攝要點」。";

/// The resolved system and user prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub system: String,
    pub user: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user: DEFAULT_USER_PROMPT.to_string(),
        }
    }
}

impl PromptSet {
    /// Resolve prompts from config, reading any `*_file` overrides from disk.
    pub fn from_config(config: &PromptConfig) -> Result<Self, ConfigError> {
        let system = match &config.system_file {
            Some(path) => read_prompt_file(path)?,
            None => config.system.trim().to_string(),
        };
        let user = match &config.user_file {
            Some(path) => read_prompt_file(path)?,
            None => config.user.trim().to_string(),
        };

        if system.is_empty() || user.is_empty() {
            return Err(ConfigError::ValidationError(
                "resolved prompts must not be empty".into(),
            ));
        }

        Ok(Self { system, user })
    }
}

fn read_prompt_file(path: &Path) -> Result<String, ConfigError> {
    let path_str = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&path_str).into_owned());
    tracing::debug!("Loading prompt from {}", expanded.display());
    Ok(std::fs::read_to_string(&expanded)?.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_used_without_files() {
        let prompts = PromptSet::from_config(&PromptConfig::default()).unwrap();
        assert_eq!(prompts, PromptSet::default());
        assert!(prompts.system.contains("非診斷"));
        assert!(prompts.user.contains("手掌相片"));
    }

    #[test]
    fn test_inline_prompts_are_trimmed() {
        let config = PromptConfig {
            system: "\n  persona  \n".to_string(),
            user: " describe ".to_string(),
            ..Default::default()
        };
        let prompts = PromptSet::from_config(&config).unwrap();
        assert_eq!(prompts.system, "persona");
        assert_eq!(prompts.user, "describe");
    }

    #[test]
    fn test_file_overrides_inline_prompt() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  system from file  ").unwrap();
        let config = PromptConfig {
            system_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let prompts = PromptSet::from_config(&config).unwrap();
        assert_eq!(prompts.system, "system from file");
        assert_eq!(prompts.user, DEFAULT_USER_PROMPT);
    }

    #[test]
    fn test_missing_prompt_file_is_read_error() {
        let config = PromptConfig {
            user_file: Some("/definitely/not/here/user.txt".into()),
            ..Default::default()
        };
        let err = PromptSet::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_empty_prompt_file_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = PromptConfig {
            user_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(PromptSet::from_config(&config).is_err());
    }
}
