//! An answering service reached over HTTP.
//!
//! The service is a single JSON endpoint: the request body is
//! `{ "message": string }` and a successful reply carries the answer, the
//! cited source labels and the excerpts behind them.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use citechat_service::{
    AnswerService, AnswerServiceError, ChatAnswer, ChatRequest, ErrorKind,
};
use mime::Mime;
use reqwest::{Client, header};
use tracing::Instrument;

pub use config::{HttpServiceConfig, HttpServiceConfigBuilder};

/// Error type for [`HttpAnswerService`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if let Some(status) = err.status() {
            ErrorKind::Status(status.as_u16())
        } else if err.is_decode() {
            ErrorKind::InvalidPayload
        } else {
            ErrorKind::Transport
        };
        Self::new(format!("{err}"), kind)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {}

impl AnswerServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Answering service behind an HTTP endpoint.
#[derive(Clone, Debug)]
pub struct HttpAnswerService {
    client: Client,
    config: Arc<HttpServiceConfig>,
}

impl HttpAnswerService {
    /// Creates a new `HttpAnswerService` with the given configuration.
    pub fn new(config: HttpServiceConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::from_reqwest)?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration of this service.
    #[inline]
    pub fn config(&self) -> &HttpServiceConfig {
        &self.config
    }
}

impl AnswerService for HttpAnswerService {
    type Error = Error;

    fn ask(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatAnswer, Self::Error>> + Send + 'static
    {
        let url = self.config.chat_url();
        let resp_fut = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&proto::create_request(req))
            .send();

        async move {
            let resp = resp_fut.await.map_err(Error::from_reqwest)?;

            let status = resp.status();
            if !status.is_success() {
                return Err(Error::new(
                    format!("{url} replied with {status}"),
                    ErrorKind::Status(status.as_u16()),
                ));
            }

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            let is_json = content_type
                .as_deref()
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| {
                    m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
                })
                .unwrap_or(false);
            if !is_json {
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::InvalidPayload,
                ));
            }

            let body = resp.bytes().await.map_err(Error::from_reqwest)?;
            let answer = proto::decode_answer(&body).map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::InvalidPayload)
            })?;
            trace!(
                "got an answer with {} sources, {} chunks",
                answer.sources.len(),
                answer.chunks.len()
            );
            Ok(answer)
        }
        .instrument(trace_span!("chat request"))
    }
}
