use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::types::*;
use crate::provider::LLMProvider;
use crate::types::Config;
use crate::{Error, Prompt, Response};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider for the public Generative Language API, authenticated by API key.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider for `model`.
    pub fn new(api_key: String, model: String) -> Result<Self, Error> {
        // No timeout: the call is a single blocking round trip.
        let client = Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
            endpoint: None,
        })
    }

    /// Create a new Gemini provider that posts to a full `generateContent` URL
    /// (used for testing and custom gateways).
    pub fn new_with_endpoint(
        api_key: String,
        model: String,
        endpoint: String,
    ) -> Result<Self, Error> {
        let mut provider = Self::new(api_key, model)?;
        provider.endpoint = Some(endpoint);
        Ok(provider)
    }

    /// Create a provider from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut provider = Self::new(config.api_key.clone(), config.model.clone())?;
        provider.endpoint = config.endpoint.clone();
        Ok(provider)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Convert a prompt to the Gemini request format.
    fn convert_request(prompt: &Prompt) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart::Text {
                    text: prompt.text(),
                }],
            }],
        }
    }

    /// Get the API endpoint for the model.
    fn get_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "{DEFAULT_BASE_URL}/v1beta/models/{}:generateContent",
                self.model
            ),
        }
    }

    /// Text of the first candidate when there is any, the raw body otherwise.
    fn convert_response(body: Value) -> Result<Response, Error> {
        let parsed: GenerateContentResponse = serde_json::from_value(body.clone())?;

        if let Some(candidate) = parsed.candidates.first() {
            debug!("Finish reason: {:?}", candidate.finish_reason);
        }
        if let Some(metadata) = parsed.usage_metadata.clone() {
            let usage = Usage::from(metadata);
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens,
                "Token usage"
            );
        }

        let text = parsed.text();
        if text.is_empty() {
            debug!("Response has no text, returning it as structured data");
            Ok(Response::Structured(body))
        } else {
            Ok(Response::Text(text))
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate(&self, prompt: &Prompt) -> Result<Response, Error> {
        let request = Self::convert_request(prompt);
        let endpoint = self.get_endpoint();

        info!("Sending request to {}", self.model);
        let response = self
            .client
            .post(&endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::provider(
                "Gemini",
                format!("API error ({status}): {body}"),
            ));
        }

        Self::convert_response(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_format() {
        let prompt = Prompt::from_override("Hello");
        let request = GeminiProvider::convert_request(&prompt);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"contents": [{"role": "user", "parts": [{"text": "Hello"}]}]})
        );
    }

    #[test]
    fn test_default_endpoint() {
        let provider =
            GeminiProvider::new("key".to_string(), "gemini-2.5-flash".to_string()).unwrap();
        assert_eq!(
            provider.get_endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_custom_endpoint() {
        let provider = GeminiProvider::new_with_endpoint(
            "key".to_string(),
            "gemini-2.5-flash".to_string(),
            "http://localhost:8080/generate".to_string(),
        )
        .unwrap();
        assert_eq!(provider.get_endpoint(), "http://localhost:8080/generate");
    }

    #[test]
    fn test_text_parts_are_joined() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Try the "}, {"text": "X-M5."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14}
        });

        let response = GeminiProvider::convert_response(body).unwrap();
        assert_eq!(response, Response::Text("Try the X-M5.".to_string()));
    }

    #[test]
    fn test_usage_defaults_missing_counts() {
        let metadata: GeminiUsageMetadata =
            serde_json::from_value(json!({"promptTokenCount": 7, "totalTokenCount": 7})).unwrap();

        assert_eq!(
            Usage::from(metadata),
            Usage {
                input_tokens: 7,
                output_tokens: 0,
                total_tokens: 7,
            }
        );
    }

    #[test]
    fn test_only_first_candidate_is_used() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        });

        let response = GeminiProvider::convert_response(body).unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_non_text_parts_are_skipped() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [
                    {"functionCall": {"name": "lookup", "args": {}}},
                    {"text": "done"}
                ]}
            }]
        });

        let response = GeminiProvider::convert_response(body).unwrap();
        assert_eq!(response.text(), Some("done"));
    }

    #[test]
    fn test_blocked_prompt_is_structured() {
        let body = json!({
            "promptFeedback": {"blockReason": "SAFETY"},
            "usageMetadata": {"promptTokenCount": 7, "totalTokenCount": 7}
        });

        let response = GeminiProvider::convert_response(body.clone()).unwrap();
        assert_eq!(response, Response::Structured(body));
    }
}
