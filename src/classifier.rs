//! Topical relevance judgments for the post filter
//!
//! The filter endpoint only sees [`RelevanceClassifier`]; the HTTP
//! implementation talks to any OpenAI-compatible chat completions API.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ClassifierConfig;

/// Decides whether a text is about a topic
#[async_trait]
pub trait RelevanceClassifier: Send + Sync {
    async fn is_relevant(&self, topic: &str, text: &str) -> Result<bool>;
}

/// Classifier backed by a chat completions endpoint
pub struct ChatClassifier {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

const SYSTEM_PROMPT: &str = "You judge whether a social media post is about a given topic. \
Answer with a single word: yes or no.";

impl ChatClassifier {
    /// Build from config; `None` when no endpoint is configured
    pub fn from_config(config: &ClassifierConfig) -> Result<Option<Self>> {
        let Some(api_url) = config.api_url.clone() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create classifier HTTP client")?;

        Ok(Some(Self {
            client,
            api_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl RelevanceClassifier for ChatClassifier {
    async fn is_relevant(&self, topic: &str, text: &str) -> Result<bool> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(topic, text),
                },
            ],
            temperature: 0.0,
            max_tokens: 3,
        };

        let mut builder = self.client.post(&self.api_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.context("Classifier request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            bail!("Classifier returned {}: {}", status, error);
        }

        let result: ChatResponse = response
            .json()
            .await
            .context("Failed to parse classifier response")?;

        let answer = result
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .context("Classifier response had no content")?;

        Ok(parse_verdict(answer))
    }
}

fn build_prompt(topic: &str, text: &str) -> String {
    format!("Topic: {}\n\nPost:\n{}\n\nIs this post about the topic?", topic, text)
}

/// Read a yes/no answer; anything that is not a clear yes counts as no
fn parse_verdict(answer: &str) -> bool {
    let word: String = answer
        .trim()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    matches!(word.as_str(), "yes" | "true" | "relevant")
}
