//! Completion client implementations

use crate::prompt::SYSTEM_PROMPT;
use crate::LLMConfig;
use async_trait::async_trait;
use seo_core::{Result, SeoError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

/// Chat message for LLM communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    /// Create new chat message
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    /// System instruction message
    pub fn system(content: &str) -> Self {
        Self::new("system", content)
    }

    /// User message
    pub fn user(content: &str) -> Self {
        Self::new("user", content)
    }

    /// Get role
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Get content
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Trait for text completion services
///
/// One call is one request; implementations never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` and return the trimmed text of the first choice
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

/// OpenAI-compatible chat completions client
pub struct OpenAIClient {
    config: LLMConfig,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("endpoint", &self.config.endpoint())
            .field("model", &self.config.model())
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    /// Create a client, failing before any request when no credential is set
    pub fn new(config: LLMConfig) -> Result<Self> {
        let api_key = match config.api_key() {
            Some(key) => key.to_string(),
            None => {
                error!("OpenAI API key not found");
                return Err(SeoError::ClientUnavailable(
                    "OpenAI API key not found".to_string(),
                ));
            }
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| {
                error!("Failed to build OpenAI client: {}", e);
                SeoError::ClientUnavailable(format!("failed to build HTTP client: {}", e))
            })?;

        info!("OpenAI client ready ({})", config.model());
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    fn request_for(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model().to_string(),
            temperature: self.config.temperature(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            max_tokens: self.config.max_tokens(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self.request_for(prompt);

        debug!("Sending request to {}", self.config.endpoint());

        let response = self
            .client
            .post(self.config.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Completion request failed: {}", e);
                SeoError::Completion(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Completion API error {}: {}", status, text);
            return Err(SeoError::Completion(format!("API error {}: {}", status, text)));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!("Invalid completion response body: {}", e);
            SeoError::Completion(format!("invalid response body: {}", e))
        })?;

        if let Some(usage) = &chat_response.usage {
            debug!("Completion used {} tokens", usage.total_tokens);
        }

        let content = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content().trim().to_string())
            .ok_or_else(|| {
                error!("No choices in completion response");
                SeoError::Completion("no response from model".to_string())
            })?;

        info!("Raw output generated ({} chars)", content.len());
        Ok(content)
    }

    fn model(&self) -> &str {
        self.config.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Accept one connection, answer it with `status` and `body`, and hand
    /// back the raw request text
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}/v1/chat/completions", address), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buffer.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).to_string()
    }

    fn client_for(endpoint: String) -> OpenAIClient {
        let config = LLMConfig::default()
            .with_endpoint(endpoint)
            .with_api_key(Some("sk-test".to_string()))
            .with_timeout(5);
        OpenAIClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_complete_trims_first_choice() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"  {\"tags\":[]}  \n"}},{"message":{"role":"assistant","content":"second"}}],"usage":{"total_tokens":12}}"#,
        )
        .await;

        let content = client_for(endpoint).complete("describe this video").await.unwrap();
        assert_eq!(content, r#"{"tags":[]}"#);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("post /v1/chat/completions"));
        assert!(request.contains("authorization: bearer sk-test"));
        assert!(request.contains("describe this video"));
    }

    #[tokio::test]
    async fn test_complete_server_error_is_completion_error() {
        let (endpoint, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

        let err = client_for(endpoint).complete("prompt").await.unwrap_err();

        match err {
            SeoError::Completion(message) => assert!(message.contains("500")),
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_completion_error() {
        let (endpoint, server) = serve_once("200 OK", r#"{"choices":[]}"#).await;

        let err = client_for(endpoint).complete("prompt").await.unwrap_err();

        assert!(matches!(err, SeoError::Completion(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_invalid_body_is_completion_error() {
        let (endpoint, server) = serve_once("200 OK", "not json at all").await;

        let err = client_for(endpoint).complete("prompt").await.unwrap_err();

        match err {
            SeoError::Completion(message) => assert!(message.contains("invalid response body")),
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[test]
    fn test_missing_key_is_client_unavailable() {
        let err = OpenAIClient::new(LLMConfig::default()).unwrap_err();
        assert!(matches!(err, SeoError::ClientUnavailable(_)));

        let blank = LLMConfig::default().with_api_key(Some("   ".to_string()));
        let err = OpenAIClient::new(blank).unwrap_err();
        assert!(matches!(err, SeoError::ClientUnavailable(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let config = LLMConfig::default().with_api_key(Some("sk-test".to_string()));
        let client = OpenAIClient::new(config).unwrap();

        let body = serde_json::to_value(client.request_for("describe this video")).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert!((body["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "describe this video");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_debug_hides_credential() {
        let config = LLMConfig::default().with_api_key(Some("sk-secret".to_string()));
        let client = OpenAIClient::new(config).unwrap();
        assert!(!format!("{:?}", client).contains("sk-secret"));
    }
}
