pub type CardResult<T> = Result<T, CardError>;

/// Failure taxonomy for the card pipeline.
///
/// Every stage maps its failures onto exactly one variant; the assembler
/// aborts on the first error and never returns a partial image.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    #[error("font resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("empty background candidate set")]
    EmptyCandidateSet,

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("resize error: {0}")]
    Resize(String),

    #[error("measurement error: {0}")]
    Measurement(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn resize(msg: impl Into<String>) -> Self {
        Self::Resize(msg.into())
    }

    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CardError::resource_unavailable("x")
                .to_string()
                .contains("font resource unavailable:")
        );
        assert!(
            CardError::EmptyCandidateSet
                .to_string()
                .contains("empty background candidate set")
        );
        assert!(CardError::fetch("x").to_string().contains("fetch failed:"));
        assert!(CardError::decode("x").to_string().contains("decode error:"));
        assert!(CardError::resize("x").to_string().contains("resize error:"));
        assert!(
            CardError::measurement("x")
                .to_string()
                .contains("measurement error:")
        );
        assert!(CardError::render("x").to_string().contains("render error:"));
        assert!(CardError::encode("x").to_string().contains("encode error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CardError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
