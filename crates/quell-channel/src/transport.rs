//! Request/response transports
//!
//! The in-process transport pairs a bounded request queue with a oneshot
//! reply slot per request. The UI side holds the [`LocalTransport`], the
//! background side drains the [`BackgroundPort`].

use crate::message::{ChannelRequest, ChannelResponse};
use async_trait::async_trait;
use quell_core::{ChannelError, ClientConfig};
use tokio::sync::{mpsc, oneshot};

/// Carries one request to the background and waits for its reply
#[async_trait(?Send)]
pub trait Transport {
    async fn request(&self, request: ChannelRequest) -> Result<ChannelResponse, ChannelError>;
}

struct Envelope {
    request: ChannelRequest,
    reply: oneshot::Sender<ChannelResponse>,
}

/// UI end of an in-process channel
#[derive(Clone)]
pub struct LocalTransport {
    tx: mpsc::Sender<Envelope>,
}

/// Background end of an in-process channel
pub struct BackgroundPort {
    rx: mpsc::Receiver<Envelope>,
}

/// A request waiting for the background to answer
pub struct PendingRequest {
    request: ChannelRequest,
    reply: oneshot::Sender<ChannelResponse>,
}

/// Create a connected transport pair with room for `capacity` queued requests
pub fn local_channel(capacity: usize) -> (LocalTransport, BackgroundPort) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (LocalTransport { tx }, BackgroundPort { rx })
}

/// [`local_channel`] sized by `config.channel_capacity`
pub fn local_channel_with(config: &ClientConfig) -> (LocalTransport, BackgroundPort) {
    local_channel(config.channel_capacity)
}

#[async_trait(?Send)]
impl Transport for LocalTransport {
    async fn request(&self, request: ChannelRequest) -> Result<ChannelResponse, ChannelError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| ChannelError::Disconnected)?;
        response.await.map_err(|_| ChannelError::Disconnected)
    }
}

impl BackgroundPort {
    /// Next queued request, or `None` once every transport is dropped
    pub async fn recv(&mut self) -> Option<PendingRequest> {
        self.rx.recv().await.map(|envelope| PendingRequest {
            request: envelope.request,
            reply: envelope.reply,
        })
    }

    /// Answer requests with `handler` until the UI side goes away
    pub async fn serve<F>(mut self, mut handler: F)
    where
        F: FnMut(&ChannelRequest) -> ChannelResponse,
    {
        while let Some(pending) = self.recv().await {
            let response = handler(pending.request());
            pending.respond(response);
        }
        log::debug!("Message channel closed");
    }
}

impl PendingRequest {
    pub fn request(&self) -> &ChannelRequest {
        &self.request
    }

    /// Send the reply; a caller that stopped waiting is ignored
    pub fn respond(self, response: ChannelResponse) {
        if self.reply.send(response).is_err() {
            log::warn!("Dropped reply to {}: caller went away", self.request.kind());
        }
    }
}
