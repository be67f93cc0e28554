use std::collections::HashMap;

use askdb_core::AskdbError;
use regex::Regex;

/// Minimal `{{var}}` template. Unlike a general templating engine, an
/// unbound variable is an error: a prompt with a hole in it would silently
/// degrade both completion calls.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String, AskdbError> {
        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
            .map_err(|err| AskdbError::InvalidConfig(err.to_string()))?;

        let mut missing: Option<String> = None;
        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            let key = &caps[1];
            match vars.get(key) {
                Some(value) => value.clone(),
                None => {
                    missing.get_or_insert_with(|| key.to_string());
                    String::new()
                }
            }
        });

        if let Some(key) = missing {
            return Err(AskdbError::InvalidConfig(format!(
                "prompt variable '{key}' is unbound"
            )));
        }
        Ok(rendered.into_owned())
    }
}
