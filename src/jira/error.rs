use reqwest::StatusCode;
use thiserror::Error;

/// Remote failures keep the original status code and raw body so the UI can
/// surface them verbatim.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connection failed: {status} - {body}")]
    Connect { status: StatusCode, body: String },

    #[error("query failed: {status} - {body}")]
    Query { status: StatusCode, body: String },

    #[error("mutation failed: {status} - {body}")]
    Mutation { status: StatusCode, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_status_and_body() {
        let err = Error::Query {
            status: StatusCode::BAD_REQUEST,
            body: "jql parse error at 'statu'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("jql parse error at 'statu'"));

        let err = Error::Connect {
            status: StatusCode::UNAUTHORIZED,
            body: "Basic auth with password is not allowed".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("connection failed"));
        assert!(msg.contains("401"));
        assert!(msg.contains("not allowed"));

        let err = Error::Mutation {
            status: StatusCode::NOT_FOUND,
            body: "Issue does not exist".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("mutation failed"));
        assert!(msg.contains("404"));
    }
}
