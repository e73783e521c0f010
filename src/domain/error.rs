use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Upstream error: {provider} returned HTTP {status}: {message}")]
    Upstream {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Fetch error: {message}")]
    Fetch { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn upstream(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_error() {
        let error = DomainError::credential("CEREBRAS_API_KEY is not set");
        assert_eq!(
            error.to_string(),
            "Credential error: CEREBRAS_API_KEY is not set"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("cerebras", "connection refused");
        assert_eq!(
            error.to_string(),
            "Provider error: cerebras - connection refused"
        );
    }

    #[test]
    fn test_upstream_error() {
        let error = DomainError::upstream("parallel", 429, "rate limited");
        assert_eq!(
            error.to_string(),
            "Upstream error: parallel returned HTTP 429: rate limited"
        );
    }
}
