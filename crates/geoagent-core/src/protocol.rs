//! Per-request protocol: receive, query, normalize, assemble, reply.
//!
//! [`handle_message`] drives one inbound request for any [`Adaptor`] and
//! always sends exactly one [`Reply`] back through a [`ReplySink`]. Failures
//! at any step become [`Reply::Error`]; nothing is dropped silently.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{AdaptorError, NormalizeError, ProviderError, SendError};
use crate::model::{Reply, RequestId, Validate};
use crate::provider::ProviderResult;

/// Outbound half of the message bus.
///
/// Delivery confirmation belongs to the bus; the handler only promises a
/// single send attempt per request.
pub trait ReplySink {
    /// # Errors
    ///
    /// Returns [`SendError`] if the bus rejects the reply.
    fn send(&self, to: &str, reply: Reply) -> impl Future<Output = Result<(), SendError>> + Send;
}

/// A reply addressed to the sender of the original request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    pub to: String,
    pub reply: Reply,
}

/// [`ReplySink`] backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelSink {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ReplySink for ChannelSink {
    fn send(&self, to: &str, reply: Reply) -> impl Future<Output = Result<(), SendError>> + Send {
        let result = self
            .tx
            .send(Outbound {
                to: to.to_owned(),
                reply,
            })
            .map_err(|_| SendError {
                to: to.to_owned(),
                reason: "reply channel closed".to_owned(),
            });
        std::future::ready(result)
    }
}

/// One provider-backed adaptor.
///
/// `query` is the only step allowed to suspend. `normalize` and `assemble`
/// are pure and synchronous.
pub trait Adaptor: Send + Sync {
    type Request: Validate + Send + Sync;

    /// One normalized entry, as handed from `normalize` to `assemble`.
    type Line: Send;

    /// Protocol name, used in logs.
    const PROTOCOL: &'static str;

    /// Calls the provider for an already-validated request.
    fn query(
        &self,
        request: &Self::Request,
    ) -> impl Future<Output = Result<ProviderResult, ProviderError>> + Send;

    /// Turns the provider output into normalized entries, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::MalformedProviderResponse`] when the payload
    /// does not have the expected shape.
    fn normalize(&self, result: &ProviderResult) -> Result<Vec<Self::Line>, NormalizeError>;

    /// Wraps normalized entries into the reply envelope.
    fn assemble(&self, lines: Vec<Self::Line>, request_id: RequestId) -> Reply;
}

/// Handles one inbound request and sends exactly one reply to `sender`.
///
/// Returns the reply that was sent (or attempted, if the sink failed).
pub async fn handle_message<A, S>(adaptor: &A, sink: &S, sender: &str, request: A::Request) -> Reply
where
    A: Adaptor,
    S: ReplySink + Sync,
{
    tracing::info!(protocol = A::PROTOCOL, sender = %sender, "received message");

    let reply = match run_pipeline(adaptor, &request).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!(
                protocol = A::PROTOCOL,
                sender = %sender,
                error = %err,
                "request failed"
            );
            Reply::Error {
                message: err.to_string(),
            }
        }
    };

    if let Err(err) = sink.send(sender, reply.clone()).await {
        tracing::error!(protocol = A::PROTOCOL, error = %err, "reply not delivered");
    }
    reply
}

async fn run_pipeline<A: Adaptor>(
    adaptor: &A,
    request: &A::Request,
) -> Result<Reply, AdaptorError> {
    request.validate()?;
    let result = adaptor.query(request).await?;
    let lines = adaptor.normalize(&result)?;
    let request_id = RequestId::generate();
    tracing::debug!(
        protocol = A::PROTOCOL,
        request_id = %request_id,
        lines = lines.len(),
        empty_sentinel = result.is_empty_sentinel(),
        "normalized provider result"
    );
    Ok(adaptor.assemble(lines, request_id))
}
