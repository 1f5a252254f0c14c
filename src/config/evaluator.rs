use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::error::EvodistError;
use serde::{Deserialize, Serialize};

/// How the master reaches its evaluator.
///
/// With no `command` the master speaks the protocol on its own stdin/stdout
/// and expects an outside harness to wire it to an evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl ConfigSection for EvaluatorConfig {
    fn section_name() -> &'static str {
        "evaluator"
    }

    fn validate(&self) -> Result<(), EvodistError> {
        if let Some(command) = &self.command {
            if command.trim().is_empty() {
                return Err(EvodistError::Configuration(
                    "Evaluator command must not be empty".to_string()
                ));
            }
        } else if !self.args.is_empty() {
            return Err(EvodistError::Configuration(
                "Evaluator args given without a command".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evaluator".to_string(),
            fields: vec![
                FieldManifest::new(
                    "command",
                    "string",
                    serde_json::Value::Null,
                    "Evaluator program to spawn; unset uses stdin/stdout",
                ),
                FieldManifest::new(
                    "args",
                    "string[]",
                    serde_json::json!([]),
                    "Arguments passed to the evaluator program",
                ),
            ],
        }
    }
}
