//! Client layer: applies delivery overrides, resolves options and submits batches.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    Message, OptionOverrides, ProductToken, Recipient, SendOptions, ValidationError,
};

const DEFAULT_ENDPOINT: &str = "https://gw.cmtelecom.com/v1.0/message";
const SUCCESS_STATUS: u16 = 200;
const JSON_CONTENT_TYPE: &str = "application/json";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Status code and body returned by an [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP collaborator used to reach the gateway.
///
/// Implementations must be safe to share between concurrent sends.
pub trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).body(body);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = read_body(status, response.text()).await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Await the response body. A failed read after `200 OK` yields an empty body, since the
/// gateway has already accepted the batch by then.
async fn read_body<E>(
    status: u16,
    body: impl Future<Output = Result<String, E>>,
) -> Result<String, Box<dyn StdError + Send + Sync>>
where
    E: StdError + Send + Sync + 'static,
{
    match body.await {
        Ok(body) => Ok(body),
        Err(err) if status == SUCCESS_STATUS => {
            tracing::warn!(error = %err, "failed to read body of accepted batch");
            Ok(String::new())
        }
        Err(err) => Err(Box::new(err)),
    }
}

#[derive(Debug, thiserror::Error)]
/// The gateway call was attempted and did not succeed.
pub enum RequestFailure {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with something other than `200 OK`.
    #[error("invalid response: HTTP {status}")]
    InvalidResponse { status: u16, body: Option<String> },
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
pub enum GatewayError {
    /// A message, sender or option was rejected before any request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request was sent but the batch was not accepted.
    #[error("request failed: {0}")]
    Request(#[from] RequestFailure),

    #[error("failed to encode payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The client could not be constructed.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}

#[derive(Clone)]
/// Builder for [`GatewayClient`].
pub struct GatewayClientBuilder {
    token: ProductToken,
    options: OptionOverrides,
    delivery_phone_numbers: Vec<Recipient>,
    disable_delivery: bool,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl GatewayClientBuilder {
    pub fn new(token: ProductToken) -> Self {
        Self {
            token,
            options: OptionOverrides::default(),
            delivery_phone_numbers: Vec::new(),
            disable_delivery: false,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Client-level options merged over the built-in defaults at [`build`](Self::build) time.
    pub fn options(mut self, options: OptionOverrides) -> Self {
        self.options = options;
        self
    }

    /// Redirect every outgoing message to these numbers. An empty list disables the redirect.
    pub fn delivery_phone_numbers(mut self, numbers: Vec<Recipient>) -> Self {
        self.delivery_phone_numbers = numbers;
        self
    }

    /// Turn sends into no-ops that leave messages unsent.
    pub fn disable_delivery(mut self, disable: bool) -> Self {
        self.disable_delivery = disable;
        self
    }

    /// Override the gateway URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom HTTP transport instead of the built-in `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Whether `timeout` or `user_agent` was set alongside a custom transport.
    fn ignores_http_settings(&self) -> bool {
        self.transport.is_some() && (self.timeout.is_some() || self.user_agent.is_some())
    }

    /// Build a [`GatewayClient`].
    ///
    /// Fails when the options are invalid or the endpoint is not an absolute http(s) URL.
    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let options = SendOptions::default().resolve(&self.options)?;

        if self.ignores_http_settings() {
            tracing::debug!(
                timeout = ?self.timeout,
                user_agent = ?self.user_agent,
                "custom transport supplied, ignoring timeout and user agent"
            );
        }

        let endpoint = url::Url::parse(&self.endpoint).map_err(|err| {
            GatewayError::Config(format!("invalid endpoint {:?}: {err}", self.endpoint))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(GatewayError::Config(format!(
                "unsupported endpoint scheme: {}",
                endpoint.scheme()
            )));
        }

        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| GatewayError::Config(err.to_string()))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(GatewayClient {
            token: self.token,
            options,
            delivery_phone_numbers: self.delivery_phone_numbers,
            disable_delivery: self.disable_delivery,
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[derive(Clone)]
/// High-level CM.com gateway client.
///
/// A whole batch is sent as one request and either every message is accepted or none is.
/// The configuration is fixed at construction, so a client can be shared between tasks.
pub struct GatewayClient {
    token: ProductToken,
    options: SendOptions,
    delivery_phone_numbers: Vec<Recipient>,
    disable_delivery: bool,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl GatewayClient {
    /// Create a client with default options and the default endpoint.
    pub fn new(token: ProductToken) -> Result<Self, GatewayError> {
        Self::builder(token).build()
    }

    pub fn builder(token: ProductToken) -> GatewayClientBuilder {
        GatewayClientBuilder::new(token)
    }

    /// Client-level options every send starts from.
    pub fn options(&self) -> &SendOptions {
        &self.options
    }

    /// Send a single message. See [`GatewayClient::send_batch`].
    pub async fn send_message(
        &self,
        message: &mut Message,
        overrides: &OptionOverrides,
    ) -> Result<(), GatewayError> {
        self.send_batch(std::slice::from_mut(message), overrides)
            .await
    }

    /// Send every message in `messages` as one gateway request.
    ///
    /// On success every message is marked [`Sent`](crate::MessageStatus::Sent). On any error
    /// no status changes.
    ///
    /// Errors:
    /// - [`GatewayError::Validation`] when a message has no recipients, a sender breaks the
    ///   gateway rules, or `overrides` is invalid. Nothing is sent.
    /// - [`GatewayError::Request`] when the transport fails or the gateway does not answer `200`.
    pub async fn send_batch(
        &self,
        messages: &mut [Message],
        overrides: &OptionOverrides,
    ) -> Result<(), GatewayError> {
        if self.disable_delivery {
            tracing::debug!(count = messages.len(), "delivery disabled, skipping batch");
            return Ok(());
        }

        if !self.delivery_phone_numbers.is_empty() {
            tracing::debug!(
                count = messages.len(),
                recipients = self.delivery_phone_numbers.len(),
                "redirecting batch to delivery phone numbers"
            );
            for message in messages.iter_mut() {
                message.redirect(&self.delivery_phone_numbers);
            }
        }

        let options = self.options.resolve(overrides)?;
        let payload = crate::transport::build_payload(messages, &options, &self.token)?;
        let body = crate::transport::encode_payload(&payload)?;
        tracing::debug!(
            count = messages.len(),
            bytes = body.len(),
            unicode = %options.unicode(),
            "built gateway payload"
        );

        let headers = vec![("Content-Type".to_owned(), JSON_CONTENT_TYPE.to_owned())];
        let response = self
            .http
            .post(&self.endpoint, headers, body)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "gateway transport failed");
                RequestFailure::Transport(err)
            })?;

        if response.status != SUCCESS_STATUS {
            tracing::warn!(status = response.status, "gateway rejected batch");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(RequestFailure::InvalidResponse {
                status: response.status,
                body,
            }
            .into());
        }

        for message in messages.iter_mut() {
            message.mark_sent();
        }
        tracing::info!(count = messages.len(), "gateway accepted batch");
        Ok(())
    }
}
