//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Checklist document does not exist
    pub fn checklist_not_found(path: &Path) -> Self {
        Self::new(format!("Checklist not found: {}", path.display()))
            .with_context("The checklist document given by --checklist or config.toml does not exist")
            .with_suggestions([
                format!("TRY: Check that the file exists: ls -la {}", path.display()),
                "TRY: Omit --checklist to use the bundled WCAG 2.1 checklist".to_string(),
            ])
    }

    /// Checklist document failed to parse or validate
    pub fn invalid_checklist(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid checklist: {}", details))
            .with_context(format!("Failed to load checklist: {}", path.display()))
            .with_suggestions([
                "TRY: Every criterion needs number, title and level fields".to_string(),
                "TRY: Criterion ids must be unique".to_string(),
            ])
    }

    /// Import file is not a progress object
    pub fn malformed_import(path: &Path, details: &str) -> Self {
        Self::new(format!("Could not import progress: {}", details))
            .with_context(format!("{} is not a valid progress file", path.display()))
            .with_suggestions([
                "TRY: Import a file written by 'wcag progress export'".to_string(),
                "TRY: The file must be a JSON object of criterion id to true/false".to_string(),
            ])
    }

    /// One or more criterion ids are not in the checklist
    pub fn unknown_criteria(ids: &[String]) -> Self {
        Self::new(format!("Unknown criteria: {}", ids.join(", ")))
            .with_context("No criterion with these ids exists in the checklist")
            .with_suggestions([
                "TRY: Use ids like sc-1-4-3 or numbers like 1.4.3".to_string(),
                "TRY: Find ids with: wcag search <term>".to_string(),
            ])
    }

    /// Config file could not be parsed
    pub fn invalid_config(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid config: {}", details))
            .with_context(format!("Failed to parse {}", path.display()))
            .with_suggestion("TRY: Supported keys are checklist, page_size and tick_rate_ms")
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Print an error as a JSON object on stdout.
pub fn print_json_error(err: &anyhow::Error) {
    let value = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({
            "error": helpful.message,
            "context": helpful.context,
            "suggestions": helpful.suggestions,
        }),
        None => serde_json::json!({
            "error": format!("{:#}", err),
        }),
    };
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{}", text),
        Err(_) => eprintln!("{:?}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While importing")
            .with_suggestion("TRY: Do this");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While importing"));
        assert!(display.contains("TRY: Do this"));
    }

    #[test]
    fn test_unknown_criteria_lists_ids() {
        let err = HelpfulError::unknown_criteria(&["sc-9-9-9".to_string(), "7.7".to_string()]);
        assert!(err.message.contains("sc-9-9-9, 7.7"));
        assert_eq!(err.suggestions.len(), 2);
    }

    #[test]
    fn test_malformed_import_mentions_path() {
        let err = HelpfulError::malformed_import(Path::new("/tmp/bad.json"), "expected value");
        assert!(err.context.unwrap().contains("/tmp/bad.json"));
    }
}
