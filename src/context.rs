//! Optional local JSON data appended to the prompt.
//!
//! Loading never fails: a missing or broken file is downgraded to a note
//! that ends up in the prompt in place of the data.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

/// Appended to the prompt when the context file does not exist.
pub const CONTEXT_NOT_FOUND_NOTE: &str = "\n\n(camera/lens data file not found)";

const CONTEXT_HEADER: &str = "\n\nCamera-lens combinations:\n";

/// Outcome of reading the context document.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextDocument {
    /// The file was read and parsed.
    Loaded(Value),
    /// No file at the expected path.
    Missing,
    /// The file exists but could not be read or parsed.
    Unavailable(String),
}

impl ContextDocument {
    /// Read and parse the JSON document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Context file not found: {}", path.display());
            return ContextDocument::Missing;
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str::<Value>(&raw).map_err(|e| e.to_string()));

        match parsed {
            Ok(value) => {
                debug!("Loaded context file: {}", path.display());
                ContextDocument::Loaded(value)
            }
            Err(message) => {
                warn!("Failed to load context file {}: {message}", path.display());
                ContextDocument::Unavailable(message)
            }
        }
    }

    /// Text appended to the prompt for this outcome.
    pub fn prompt_section(&self) -> String {
        match self {
            // Compact form; serde_json leaves non-ASCII characters unescaped.
            ContextDocument::Loaded(value) => format!("{CONTEXT_HEADER}{value}"),
            ContextDocument::Missing => CONTEXT_NOT_FOUND_NOTE.to_string(),
            ContextDocument::Unavailable(message) => {
                format!("\n\n(failed to load camera/lens data: {message})")
            }
        }
    }
}
