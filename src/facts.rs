//! Dino-fact provider for the game-over screen
//!
//! Wraps the generative-text HTTP endpoint behind a single async call that
//! always resolves to display text: a fetched fact on success, one of two
//! fixed fallback strings otherwise. Nothing here ever surfaces an error to
//! the caller, and nothing here blocks the frame loop - the host fires the
//! request with `spawn_local` and feeds the result back through
//! [`crate::sim::TickInput::fact_result`].

use serde::{Deserialize, Serialize};

/// Prompt sent when the game-over button is clicked
pub const DEFAULT_PROMPT: &str =
    "Give me one interesting and concise fact about dinosaurs. Keep it under 100 words.";

/// Shown when the endpoint answers with an unexpected or empty shape
pub const EMPTY_FALLBACK: &str = "Could not generate a fact. Try again!";

/// Shown on transport-level failure (network error, non-JSON body)
pub const TRANSPORT_FALLBACK: &str = "Error fetching fact. Check console for details.";

const API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Outbound request body: `{"contents":[{"role":"user","parts":[{"text":...}]}]}`
#[derive(Debug, Clone, Serialize)]
pub struct FactRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

impl FactRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Expected success shape: `{"candidates":[{"content":{"parts":[{"text":...}]}}]}`
///
/// Every level is lenient: a missing or differently-shaped field reads as
/// empty rather than as a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct FactResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Serialize the outbound JSON body for a prompt
pub fn request_body(prompt: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&FactRequest::new(prompt))
}

/// Pull the fact text out of a response body.
///
/// `Err` means the body was not JSON at all (transport-class failure);
/// `Ok(None)` means valid JSON without the expected candidate structure.
pub fn extract_fact(body: &str) -> Result<Option<String>, serde_json::Error> {
    let response: FactResponse = serde_json::from_str(body)?;
    Ok(response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text))
}

/// Endpoint URL with the API key attached
pub fn endpoint(api_key: &str) -> String {
    format!("{API_BASE}?key={api_key}")
}

/// POST the prompt and resolve to display text. Never errors: failures map
/// to the fixed fallback strings.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_fact(prompt: &str, api_key: &str) -> String {
    match try_fetch(prompt, api_key).await {
        Ok(body) => match extract_fact(&body) {
            Ok(Some(text)) => {
                log::info!("fact received ({} chars)", text.len());
                text
            }
            Ok(None) => {
                log::error!("unexpected fact response structure: {body}");
                EMPTY_FALLBACK.to_string()
            }
            Err(err) => {
                log::error!("fact response was not JSON: {err}");
                TRANSPORT_FALLBACK.to_string()
            }
        },
        Err(err) => {
            web_sys::console::error_1(&err);
            TRANSPORT_FALLBACK.to_string()
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn try_fetch(prompt: &str, api_key: &str) -> Result<String, wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let body = request_body(prompt).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&endpoint(api_key), &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body was not text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = request_body("tell me about raptors").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "tell me about raptors");
    }

    #[test]
    fn test_extract_fact_happy_path() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Some sauropods exceeded 30 meters."}]}}]}"#;
        assert_eq!(
            extract_fact(body).unwrap(),
            Some("Some sauropods exceeded 30 meters.".to_string())
        );
    }

    #[test]
    fn test_extract_fact_takes_first_candidate_and_part() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"first"},{"text":"second"}]}},
            {"content":{"parts":[{"text":"other"}]}}
        ]}"#;
        assert_eq!(extract_fact(body).unwrap(), Some("first".to_string()));
    }

    #[test]
    fn test_extract_fact_empty_candidates() {
        assert_eq!(extract_fact(r#"{"candidates":[]}"#).unwrap(), None);
        assert_eq!(extract_fact(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn test_extract_fact_missing_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[]}}]}"#;
        assert_eq!(extract_fact(body).unwrap(), None);
        let body = r#"{"candidates":[{}]}"#;
        assert_eq!(extract_fact(body).unwrap(), None);
    }

    #[test]
    fn test_extract_fact_rejects_non_json() {
        assert!(extract_fact("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_endpoint_carries_key() {
        assert!(endpoint("abc123").ends_with("?key=abc123"));
    }
}
