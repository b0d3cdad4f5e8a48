use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Save error: {0}")]
    Save(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn save(msg: impl Into<String>) -> Self {
        Self::Save(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_generation_error(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    pub fn is_save_error(&self) -> bool {
        matches!(self, Self::Save(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_cause() {
        let err = DomainError::generation("quota exceeded");
        assert_eq!(err.to_string(), "Generation error: quota exceeded");
        assert!(err.is_generation_error());
        assert!(!err.is_save_error());

        let err = DomainError::save("connection lost");
        assert_eq!(err.to_string(), "Save error: connection lost");
        assert!(err.is_save_error());
    }
}
