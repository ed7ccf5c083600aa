// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::Frame;
use crate::types::{ZkxError, ZkxResult};

/// One end of a bidirectional, in-order message channel.
///
/// Dropping or [`closing`](Link::close) a link wakes the peer's pending
/// [`recv`](Link::recv) with [`ZkxError::ChannelClosed`] once buffered
/// messages are drained.
#[derive(Debug)]
pub struct Link {
    tx: UnboundedSender<String>,
    rx: UnboundedReceiver<String>,
}

/// Creates two connected link ends.
pub fn link_pair() -> (Link, Link) {
    let (a_tx, b_rx) = unbounded_channel();
    let (b_tx, a_rx) = unbounded_channel();
    (Link { tx: a_tx, rx: a_rx }, Link { tx: b_tx, rx: b_rx })
}

impl Link {
    /// # Errors
    ///
    /// Returns [`ZkxError::ChannelClosed`] if the peer is gone.
    pub fn send(&self, message: String) -> ZkxResult<()> {
        self.tx.send(message).map_err(|_| ZkxError::ChannelClosed)
    }

    /// # Errors
    ///
    /// Returns [`ZkxError::ChannelClosed`] once the peer has closed and
    /// nothing is left to read.
    pub async fn recv(&mut self) -> ZkxResult<String> {
        self.rx.recv().await.ok_or(ZkxError::ChannelClosed)
    }

    /// # Errors
    ///
    /// See [`Frame::encode`] and [`Self::send`].
    pub fn send_frame(&self, frame: &Frame) -> ZkxResult<()> {
        self.send(frame.encode()?)
    }

    /// # Errors
    ///
    /// See [`Self::recv`] and [`Frame::decode`].
    pub async fn recv_frame(&mut self) -> ZkxResult<Frame> {
        let message = self.recv().await?;
        Frame::decode(&message)
    }

    pub fn close(self) {
        drop(self);
    }
}
