#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::error::PipelineError;
    use crate::llm::{GenerationParams, GenerationProvider, check_connection};

    struct FixedReply(Result<String, PipelineError>);

    #[async_trait]
    impl GenerationProvider for FixedReply {
        async fn generate(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, PipelineError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_params_presets() {
        let deterministic = GenerationParams::deterministic();
        assert_eq!(deterministic.temperature, 0.0);
        assert!(deterministic.max_output_tokens <= 64);

        let drafting = GenerationParams::drafting();
        assert_eq!(drafting.temperature, 0.5);
        assert_eq!(drafting.top_p, Some(0.95));
        assert_eq!(drafting.max_output_tokens, 3000);

        let refining = GenerationParams::refining();
        assert_eq!(refining.max_output_tokens, 4000);
    }

    #[tokio::test]
    async fn test_check_connection_ok() {
        let provider = FixedReply(Ok("Hello".to_string()));
        assert!(check_connection(&provider).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_connection_propagates_provider_error() {
        let provider = FixedReply(Err(PipelineError::ProviderUnavailable(
            "connection refused".to_string(),
        )));
        assert!(matches!(
            check_connection(&provider).await,
            Err(PipelineError::ProviderUnavailable(_))
        ));
    }
}
