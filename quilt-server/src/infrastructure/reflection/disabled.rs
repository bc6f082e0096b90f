use crate::application::ports::{GenerationError, TextGenerator};
use async_trait::async_trait;

/// Stand-in when no provider credential is configured
///
/// Every call fails fast, so reflections degrade to the fallback line.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{FALLBACK_LINE, ReflectUseCase};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_disabled_generator_degrades_to_fallback() {
        let generator = DisabledTextGenerator;
        assert!(matches!(
            generator.generate("anything").await,
            Err(GenerationError::NotConfigured)
        ));

        let use_case = ReflectUseCase::new(Arc::new(generator), Duration::from_secs(1));
        assert_eq!(use_case.execute("I am tired").await, FALLBACK_LINE);
    }
}
