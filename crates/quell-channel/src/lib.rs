//! Message channel between UI contexts and the background process
//!
//! UI code talks to the background through [`MessageChannel`]. The
//! production implementation is [`Sender`], which encodes each call as a
//! [`ChannelRequest`] and hands it to a [`Transport`].

pub mod message;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod sender;
pub mod transport;

pub use message::{ChannelRequest, ChannelResponse};
pub use sender::{MessageChannel, Sender};
pub use transport::{
    local_channel, local_channel_with, BackgroundPort, LocalTransport, PendingRequest, Transport,
};
