use thiserror::Error;

/// Everything that can stop a lookup short of a report.
///
/// The `Display` text of each variant is exactly what the calling agent
/// receives as `error_message`.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No API key available; raised before any request is issued.
    #[error("{0}")]
    MissingCredential(&'static str),

    #[error("City name must not be empty.")]
    EmptyCity,

    /// The provider understood the request but had nothing to return.
    #[error("{0}")]
    NotFound(String),

    /// Non-success HTTP status; carries the provider's own message.
    #[error("{0}")]
    Provider(String),

    /// Network failure, with its full cause chain flattened into one line.
    #[error("{0}")]
    Transport(String),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LookupError {
    /// The request URL carries the API key, so it is dropped before the
    /// error is rendered.
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(error_chain(&err.without_url()))
    }
}

/// Joins an error and all of its sources with `": "`, skipping a source
/// whose text the message already contains.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}

impl LookupError {
    /// True for the "valid request, nothing matched" class of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("tcp connect error")]
    struct Connect(#[source] std::io::Error);

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Request(#[source] Connect);

    #[derive(Debug, Error)]
    #[error("client error: {0}")]
    struct Repeats(#[source] Connect);

    #[test]
    fn chain_keeps_every_cause() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = Request(Connect(refused));

        assert_eq!(
            error_chain(&err),
            "error sending request: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn chain_skips_cause_already_in_message() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = Repeats(Connect(refused));

        assert_eq!(error_chain(&err), "client error: tcp connect error: Connection refused");
    }

    #[test]
    fn transport_display_is_the_flattened_chain() {
        let err = LookupError::Transport("error sending request: dns error".into());
        assert_eq!(err.to_string(), "error sending request: dns error");
        assert!(!err.is_not_found());
    }
}
