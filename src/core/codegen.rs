//! Code generation — turn a free-text description into HCL via one
//! synchronous chat-completion call, then strip the markdown fence the
//! model tends to wrap its answer in.

use crate::core::config::ApiConfig;
use crate::core::error::Error;
use serde_json::Value;

/// Fixed system instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "You are an assistant that generates Terraform code.";

/// Remove a leading ```` ```hcl ```` (or bare ```` ``` ````) marker and a
/// trailing ```` ``` ````, trimming surrounding whitespace. A no-op on
/// already-clean text; interior content is preserved byte-for-byte.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```hcl")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}

/// Pull `choices[0].message.content` out of a completion response.
pub fn extract_completion(response: &Value) -> Result<&str, Error> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::Generation(
                "completion response missing choices[0].message.content".to_string(),
            )
        })
}

/// Client for the remote completion endpoint.
pub struct Generator {
    api: ApiConfig,
}

impl Generator {
    pub fn new(api: ApiConfig) -> Self {
        Self { api }
    }

    /// One blocking request: fixed system instruction, user prompt as the
    /// task. Returns the de-fenced completion text verbatim — no semantic
    /// validation of the HCL. Any transport or API failure surfaces as
    /// `Error::Generation`; nothing is written to disk here.
    pub fn generate(&self, prompt: &str) -> Result<String, Error> {
        let key = self.api.resolve_key().ok_or_else(|| {
            Error::Generation(format!(
                "no API key: set api.key in the config file or the {} env var",
                crate::core::config::API_KEY_ENV
            ))
        })?;

        let body = serde_json::json!({
            "model": self.api.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": prompt },
            ],
        });

        let response = ureq::post(&self.api.endpoint)
            .set("Authorization", &format!("Bearer {}", key))
            .send_json(body)
            .map_err(describe_api_error)?;

        let value: Value = response
            .into_json()
            .map_err(|e| Error::Generation(format!("invalid completion response: {}", e)))?;

        let content = extract_completion(&value)?;
        Ok(strip_fences(content).to_string())
    }
}

fn describe_api_error(e: ureq::Error) -> Error {
    match e {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            Error::Generation(format!("API returned {}: {}", code, body.trim()))
        }
        ureq::Error::Transport(t) => Error::Generation(format!("transport error: {}", t)),
    }
}
