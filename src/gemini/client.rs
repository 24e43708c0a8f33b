// file: src/gemini/client.rs
// description: Gemini API integration for reshaping thread text into Q&A pairs
// reference: https://ai.google.dev/api/generate-content

use crate::error::{PipelineError, Result};
use crate::models::QaPair;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_INSTRUCTION: &str = "You are helpful assistant, who can structure a raw information to a set of question answer. \
User is very uninterested person. Your job is to intrigue his curiosity by converting the raw information. \
Question can be used to grab attention, clickbait. It should be short, precise and attention grabbing. \
Answers can be long, but should reply the query in question. \
Your output will be in below json list format [{\"question\" : question, \"answer\" : answer},]";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    /// One `generateContent` round trip: send the rendered thread text,
    /// receive a JSON list of question/answer objects. Transport and API
    /// faults are [`PipelineError::ModelApi`]; a reply that is not the
    /// expected list shape is [`PipelineError::Transform`].
    pub async fn to_qa_pairs(&self, bundle_text: &str) -> Result<Vec<QaPair>> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: format!(
                        "Raw_data : ====================\n {}\n====================\n",
                        bundle_text
                    ),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        debug!(
            "Requesting Q&A conversion from Gemini for {} chars",
            bundle_text.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::ModelApi(format!("Failed to send Gemini request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::ModelApi(format!(
                "Gemini request failed with status {}: {}",
                status, error_text
            )));
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            PipelineError::ModelApi(format!("Failed to parse Gemini response envelope: {}", e))
        })?;

        let reply_text = generate_response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .ok_or_else(|| {
                PipelineError::ModelApi("Gemini returned no candidates".to_string())
            })?;

        parse_qa_list(&reply_text)
    }
}

/// Parses the model's structured reply. Pure function of the reply text, so
/// parsing the same reply twice yields the same pairs.
pub fn parse_qa_list(text: &str) -> Result<Vec<QaPair>> {
    serde_json::from_str(text.trim())
        .map_err(|e| PipelineError::Transform(format!("Reply is not a Q&A list: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_qa_list() {
        let raw = r#"[
            {"question": "What happened?", "answer": "A thing."},
            {"question": "Why?", "answer": "Because."}
        ]"#;

        let pairs = parse_qa_list(raw).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].question, "What happened?");
        assert_eq!(pairs[1].answer, "Because.");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = r#"[{"question": "Q", "answer": "A"}]"#;
        assert_eq!(parse_qa_list(raw).unwrap(), parse_qa_list(raw).unwrap());
    }

    #[test]
    fn test_parse_rejects_non_list() {
        let err = parse_qa_list(r#"{"question": "Q", "answer": "A"}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Transform(_)));
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_qa_list("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, PipelineError::Transform(_)));
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: "instruction".to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: "data".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "instruction");
        assert_eq!(value["contents"][0]["role"], "user");
    }
}
