use crate::context::ContextDocument;

/// Request used when no prompt is given on the command line.
pub const DEFAULT_REQUEST: &str =
    "I'd like a camera that is cheap and light. Which one would you recommend?";

/// Instruction appended to the default request.
pub const DEFAULT_INSTRUCTION: &str =
    "From this list, pick two or three suitable cameras to recommend and explain why.";

/// The text sent to the model: request, instruction and context section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    request: String,
    instruction: String,
    context: String,
}

impl Prompt {
    /// The built-in request/instruction pair.
    pub fn builtin() -> Self {
        Self {
            request: DEFAULT_REQUEST.to_string(),
            instruction: DEFAULT_INSTRUCTION.to_string(),
            context: String::new(),
        }
    }

    /// A prompt whose request is `text`, with no instruction.
    pub fn from_override(text: impl Into<String>) -> Self {
        Self {
            request: text.into(),
            instruction: String::new(),
            context: String::new(),
        }
    }

    /// Override text when given, the built-in pair otherwise.
    pub fn from_arg(arg: Option<String>) -> Self {
        arg.map(Self::from_override).unwrap_or_else(Self::builtin)
    }

    /// Attach the context document section.
    pub fn with_context(mut self, context: &ContextDocument) -> Self {
        self.context = context.prompt_section();
        self
    }

    /// The request text as echoed back to the user.
    pub fn request(&self) -> &str {
        &self.request
    }

    /// The full payload sent to the model.
    pub fn text(&self) -> String {
        format!("{}{}{}", self.request, self.instruction, self.context)
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::from_override(text)
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::from_override(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CONTEXT_NOT_FOUND_NOTE;
    use serde_json::json;

    #[test]
    fn test_builtin_composition() {
        let prompt = Prompt::builtin().with_context(&ContextDocument::Missing);

        assert_eq!(prompt.request(), DEFAULT_REQUEST);
        assert_eq!(
            prompt.text(),
            format!("{DEFAULT_REQUEST}{DEFAULT_INSTRUCTION}{CONTEXT_NOT_FOUND_NOTE}")
        );
    }

    #[test]
    fn test_override_replaces_builtin_pair() {
        let prompt = Prompt::from_arg(Some("Which lens for portraits?".to_string()))
            .with_context(&ContextDocument::Loaded(json!({"a": 1})));

        assert_eq!(prompt.request(), "Which lens for portraits?");
        assert!(prompt.text().starts_with("Which lens for portraits?\n\n"));
        assert!(!prompt.text().contains(DEFAULT_INSTRUCTION));
        assert!(prompt.text().contains(r#"{"a":1}"#));
    }

    #[test]
    fn test_no_arg_uses_builtin() {
        assert_eq!(Prompt::from_arg(None), Prompt::builtin());
    }

    #[test]
    fn test_from_impls() {
        let from_str: Prompt = "Hello".into();
        let from_string: Prompt = "Hello".to_string().into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str.text(), "Hello");
    }
}
