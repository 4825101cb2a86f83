use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderBotError {
    #[error("unsupported intent: {0}")]
    UnsupportedIntent(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("order store: {0}")]
    Store(#[from] anyhow::Error),
}

impl OrderBotError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::UnsupportedIntent(_) => 400,
            Self::InvalidParameters(_) => 422,
            Self::Store(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_unsupported_intent() {
        assert_eq!(
            OrderBotError::UnsupportedIntent("x".into()).http_status(),
            400
        );
    }

    #[test]
    fn http_status_invalid_parameters() {
        assert_eq!(
            OrderBotError::InvalidParameters("x".into()).http_status(),
            422
        );
    }

    #[test]
    fn http_status_store() {
        let err = OrderBotError::Store(anyhow::anyhow!("connection refused"));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn display_unsupported_intent() {
        let e = OrderBotError::UnsupportedIntent("greeting".into());
        assert_eq!(e.to_string(), "unsupported intent: greeting");
    }

    #[test]
    fn display_store() {
        let e = OrderBotError::Store(anyhow::anyhow!("pool timed out"));
        assert_eq!(e.to_string(), "order store: pool timed out");
    }
}
