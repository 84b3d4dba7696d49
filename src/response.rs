//! Response handling for a single generation.

use std::fmt;

use serde_json::Value;

/// What the remote call returned, kept opaque and rendered for display only.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Generated text.
    Text(String),
    /// A structured value, shown as indented JSON.
    Structured(Value),
}

impl Response {
    /// Render for display.
    ///
    /// Structured values are pretty-printed; if that fails the compact
    /// form is used instead.
    pub fn render(&self) -> String {
        match self {
            Response::Text(text) => text.clone(),
            Response::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// The generated text, if this is a text response.
    pub fn text(&self) -> Option<&str> {
        match self {
            Response::Text(text) => Some(text),
            Response::Structured(_) => None,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<String> for Response {
    fn from(text: String) -> Self {
        Response::Text(text)
    }
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        Response::Structured(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_renders_verbatim() {
        let response = Response::from("line one\n  line two".to_string());
        assert_eq!(response.render(), "line one\n  line two");
        assert_eq!(response.text(), Some("line one\n  line two"));
    }

    #[test]
    fn test_structured_renders_indented_json() {
        let value = json!({"zeta": [1, 2], "alpha": {"nested": "ok"}});
        let rendered = Response::from(value.clone()).render();

        assert_eq!(
            rendered,
            "{\n  \"zeta\": [\n    1,\n    2\n  ],\n  \"alpha\": {\n    \"nested\": \"ok\"\n  }\n}"
        );
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_display_matches_render() {
        let response = Response::Structured(json!(["a", "b"]));
        assert_eq!(response.to_string(), response.render());
        assert_eq!(response.text(), None);
    }
}
