//! HTTP client for the `generateContent` endpoint.
//!
//! Requests go to `{base_url}/{model}:generateContent?key=…`. Text calls ask
//! for a JSON response and read the first text part of the first candidate;
//! image calls ask for `IMAGE` and `TEXT` modalities and take the first
//! inline-data part. No retries and no timeouts: a failed call is simply
//! replaced with fallback content.

use super::{FallbackReason, Generated, ImageSet, ImageSlot, fallback, prompts};
use crate::config::AiConfig;
use crate::types::{AiAnalysis, AiCopy, ProductInput};
use futures::future::join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    text_model: String,
    image_model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl GeminiClient {
    /// Client with the key read from the environment variable named in `config`.
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config, config.api_key())
    }

    pub fn new(config: &AiConfig, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Summarize a competitor's detail page.
    pub async fn analyze_competitor(&self, url: &str) -> Generated<AiAnalysis> {
        let result = self
            .generate_json(&self.text_model, &prompts::analysis_prompt(url))
            .await;
        settle("competitor analysis", result, fallback::analysis)
    }

    /// Write the page copy, informed by the competitor analysis when there is one.
    pub async fn generate_copy(
        &self,
        input: &ProductInput,
        analysis: Option<&AiAnalysis>,
    ) -> Generated<AiCopy> {
        let result = self
            .generate_json(&self.text_model, &prompts::copy_prompt(input, analysis))
            .await;
        settle("copywriting", result, || fallback::copy(&input.product_name))
    }

    /// Generate the hero and detail images concurrently.
    ///
    /// A slot whose request fails is left out; the set is only a fallback
    /// when no slot succeeded.
    pub async fn generate_images(&self, product_name: &str, description: &str) -> Generated<ImageSet> {
        if self.api_key.is_none() {
            return Generated::Fallback {
                value: ImageSet::new(),
                reason: FallbackReason::MissingApiKey,
            };
        }

        let requests = ImageSlot::ALL.map(|slot| async move {
            let prompt = prompts::image_prompt(slot, product_name, description);
            (slot, self.generate_image(&prompt).await)
        });

        let mut images = ImageSet::new();
        let mut first_failure = None;
        for (slot, result) in join_all(requests).await {
            match result {
                Ok(uri) => {
                    images.insert(slot, uri);
                }
                Err(reason) => {
                    warn!(%slot, %reason, "image generation failed");
                    first_failure.get_or_insert(reason);
                }
            }
        }

        match first_failure {
            Some(reason) if images.is_empty() => Generated::Fallback {
                value: images,
                reason,
            },
            _ => Generated::Ai(images),
        }
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<T, FallbackReason> {
        let request = GenerateRequest::new(
            prompt,
            GenerationConfig {
                response_mime_type: Some("application/json"),
                response_modalities: None,
            },
        );
        let response = self.post(model, &request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| FallbackReason::MalformedResponse("no text part".into()))?;
        parse_model_json(text)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, FallbackReason> {
        let request = GenerateRequest::new(
            prompt,
            GenerationConfig {
                response_mime_type: None,
                response_modalities: Some(&["IMAGE", "TEXT"]),
            },
        );
        let response = self.post(&self.image_model, &request).await?;
        response
            .first_inline_data()
            .map(InlineData::to_data_uri)
            .ok_or_else(|| FallbackReason::MalformedResponse("no image in response".into()))
    }

    async fn post(
        &self,
        model: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<GenerateResponse, FallbackReason> {
        let key = self.api_key.as_deref().ok_or(FallbackReason::MissingApiKey)?;
        let url = format!("{}/{}:generateContent", self.base_url, model);
        debug!(%model, "POST generateContent");

        // without_url(): the request URL carries the API key
        let resp = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(request)
            .send()
            .await
            .map_err(|e| FallbackReason::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FallbackReason::Status(status.as_u16()));
        }

        resp.json::<GenerateResponse>()
            .await
            .map_err(|e| FallbackReason::MalformedResponse(e.without_url().to_string()))
    }
}

fn settle<T>(
    what: &str,
    result: Result<T, FallbackReason>,
    fallback: impl FnOnce() -> T,
) -> Generated<T> {
    match result {
        Ok(value) => Generated::Ai(value),
        Err(reason) => {
            if reason != FallbackReason::MissingApiKey {
                warn!(%reason, "{what} fell back to built-in content");
            }
            Generated::Fallback {
                value: fallback(),
                reason,
            }
        }
    }
}

/// Parse a model's JSON answer into `T`.
///
/// Models sometimes wrap the object in an array; the first element is used.
pub fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, FallbackReason> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| FallbackReason::MalformedResponse(format!("not JSON: {e}")))?;
    let value = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| FallbackReason::MalformedResponse("empty array".into()))?,
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| FallbackReason::MalformedResponse(format!("unexpected shape: {e}")))
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str, generation_config: GenerationConfig<'a>) -> Self {
        Self {
            contents: [Content {
                parts: [TextPart { text: prompt }],
            }],
            generation_config,
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<&'a [&'a str]>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl InlineData {
    fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl GenerateResponse {
    fn parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    fn first_text(&self) -> Option<&str> {
        self.parts().first().and_then(|p| p.text.as_deref())
    }

    fn first_inline_data(&self) -> Option<&InlineData> {
        self.parts().iter().find_map(|p| p.inline_data.as_ref())
    }
}
