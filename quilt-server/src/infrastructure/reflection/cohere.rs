use crate::application::ports::{GenerationError, TextGenerator};
use crate::infrastructure::config::ReflectionConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else if err.is_decode() {
            GenerationError::MalformedResponse(err.to_string())
        } else {
            GenerationError::Http(err.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    text: String,
}

/// Cohere chat API client
/// Infrastructure component - handles HTTP communication with the provider
pub struct CohereTextGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl CohereTextGenerator {
    pub fn new(
        api_key: impl Into<String>,
        config: &ReflectionConfig,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(CohereTextGenerator {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for CohereTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/v1/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            message: prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        Ok(body.text)
    }

    fn name(&self) -> &str {
        "cohere"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
    };
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Start a fake provider and return its address
    async fn start_fake_provider(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn config_for(addr: SocketAddr) -> ReflectionConfig {
        ReflectionConfig {
            api_url: format!("http://{}", addr),
            timeout_ms: 2_000,
            ..ReflectionConfig::default()
        }
    }

    async fn echo_chat(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if auth != "Bearer test-key" {
            return (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid api token"})));
        }
        assert_eq!(body["model"], "command-r-plus-08-2024");
        assert_eq!(body["max_tokens"], 100);
        let text = format!("echo: {}", body["message"].as_str().unwrap_or_default());
        (StatusCode::OK, Json(json!({ "text": text })))
    }

    #[tokio::test]
    async fn test_generate_reads_text_field() {
        let addr = start_fake_provider(Router::new().route("/v1/chat", post(echo_chat))).await;
        let generator = CohereTextGenerator::new("test-key", &config_for(addr)).unwrap();

        let line = generator.generate("hello").await.unwrap();
        assert_eq!(line, "echo: hello");
    }

    #[tokio::test]
    async fn test_auth_failure_is_api_error() {
        let addr = start_fake_provider(Router::new().route("/v1/chat", post(echo_chat))).await;
        let generator = CohereTextGenerator::new("wrong-key", &config_for(addr)).unwrap();

        match generator.generate("hello").await {
            Err(GenerationError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid api token"));
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_malformed() {
        let router = Router::new().route(
            "/v1/chat",
            post(|| async { Json(json!({ "generations": [] })) }),
        );
        let addr = start_fake_provider(router).await;
        let generator = CohereTextGenerator::new("test-key", &config_for(addr)).unwrap();

        assert!(matches!(
            generator.generate("hello").await,
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_http_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let generator = CohereTextGenerator::new("test-key", &config_for(addr)).unwrap();
        assert!(matches!(
            generator.generate("hello").await,
            Err(GenerationError::Http(_))
        ));
    }
}
