use crate::application::ports::{GenerationError, TextGenerator};
use std::sync::Arc;
use std::time::Duration;

/// Returned for empty input, without contacting the provider
pub const PROMPT_BACK_LINE: &str = "Tell me a little more about how you're feeling.";

/// Returned whenever the provider fails, times out or says nothing
pub const FALLBACK_LINE: &str = "Your feelings are valid. 💙";

/// Build the instruction sent to the provider, embedding the text verbatim
pub fn build_prompt(text: &str) -> String {
    format!(
        "A person said: '{}'. \
         Write back a single poetic line that reflects, deepens, or gently rephrases their emotional state. \
         Be soft, thoughtful, human, and kind.",
        text
    )
}

/// Turn user text into a short reflective line
///
/// All provider failures are absorbed here; callers always get a line.
pub struct ReflectUseCase<G>
where
    G: TextGenerator + ?Sized,
{
    generator: Arc<G>,
    timeout: Duration,
}

impl<G> ReflectUseCase<G>
where
    G: TextGenerator + ?Sized,
{
    pub fn new(generator: Arc<G>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub async fn execute(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return PROMPT_BACK_LINE.to_string();
        }

        let prompt = build_prompt(text);
        let outcome = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .unwrap_or(Err(GenerationError::Timeout));

        match outcome {
            Ok(line) if !line.trim().is_empty() => line.trim().to_string(),
            Ok(_) => {
                tracing::warn!(
                    provider = self.generator.name(),
                    "Provider returned an empty line, using fallback"
                );
                FALLBACK_LINE.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.generator.name(),
                    error = %e,
                    "Reflection failed, using fallback"
                );
                FALLBACK_LINE.to_string()
            }
        }
    }
}
