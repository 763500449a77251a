//! Request/response boundary to the model that names files.

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::OllamaConfig;
use crate::error::{Error, Result};
use crate::extract::ExtractedContent;

const NAMING_INSTRUCTION: &str = "Analyze this file's content and suggest one concise, \
descriptive filename of 3-8 words that captures its main content. Respond with ONLY the \
filename suggestion and no extra text or explanation. Do NOT include a file extension.";

/// Turns extracted content into a raw filename suggestion.
///
/// An `Err` means no suggestion is available for the file; callers skip it.
pub trait SuggestionGateway {
    fn suggest(&self, content: &ExtractedContent, model: &str) -> Result<String>;
}

/// Body of an Ollama `/api/generate` call.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl GenerateRequest {
    pub fn for_content(content: &ExtractedContent, model: &str) -> Result<Self> {
        let (prompt, images) = match content {
            ExtractedContent::Text(text) => (text_prompt(text), None),
            ExtractedContent::Image(source) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(source.read_bytes()?);
                (NAMING_INSTRUCTION.to_string(), Some(vec![encoded]))
            }
        };

        Ok(Self {
            model: model.to_string(),
            prompt,
            images,
            stream: false,
        })
    }
}

fn text_prompt(text: &str) -> String {
    format!("{NAMING_INSTRUCTION}\n\nFile Content:\n{text}")
}

/// Blocking client for a local Ollama server.
pub struct OllamaGateway {
    client: reqwest::blocking::Client,
    generate_url: String,
}

impl OllamaGateway {
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| Error::Gateway(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            generate_url: format!("{}/api/generate", config.endpoint.trim_end_matches('/')),
        })
    }
}

impl SuggestionGateway for OllamaGateway {
    fn suggest(&self, content: &ExtractedContent, model: &str) -> Result<String> {
        let request = GenerateRequest::for_content(content, model)?;
        tracing::debug!(
            url = %self.generate_url,
            model,
            kind = content.kind_name(),
            "requesting filename suggestion"
        );

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .map_err(|err| Error::Gateway(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Gateway(format!(
                "API call failed with status code {}",
                status.as_u16()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|err| Error::Gateway(format!("invalid response body: {err}")))?;
        parse_suggestion(body)
    }
}

fn parse_suggestion(body: GenerateResponse) -> Result<String> {
    if let Some(error) = body.error {
        return Err(Error::Gateway(error));
    }

    body.response
        .map(|text| text.trim().to_string())
        .ok_or_else(|| Error::Gateway("response field missing".to_string()))
}
