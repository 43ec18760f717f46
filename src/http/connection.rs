use std::io;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::parser::{ParseError, parse_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::template;
use crate::http::writer::ResponseWriter;
use crate::state::SharedState;

/// Inbound bytes kept per connection; anything past this is dropped.
pub const RECV_BUFFER_CAPACITY: usize = 512;

/// Default transport send capacity (body bound plus room for the header).
pub const SEND_BUFFER_CAPACITY: usize = template::BODY_MAX + 512;

const READ_CHUNK: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Accepted,
    Receiving,
    Processing,
    Sending,
    Closed,
    Error,
}

impl ConnectionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Error)
    }
}

/// What the transport should do after a transition.
#[derive(Debug)]
pub enum Action {
    /// Nothing to do until the next event.
    Wait,
    /// Write this response, then report it with `on_sent`.
    Send(ResponseWriter),
    /// Close the transport gracefully.
    Close,
    /// Drop the transport without sending anything.
    Abort,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("connection idle for longer than {0:?}")]
    TimedOut(Duration),
    #[error("connection aborted")]
    Aborted,
}

/// One HTTP exchange on one accepted transport connection.
///
/// The exchange is a finite state machine driven by transport events:
/// `on_accept`, `on_receive`, `on_sent` and `on_error`. Each returns the
/// [`Action`] the transport must carry out. [`Connection::run`] drives the
/// machine over any tokio byte stream.
#[derive(Debug)]
pub struct Connection {
    shared: SharedState,
    send_capacity: usize,
    state: ConnectionState,
    buffer: BytesMut,
    outcome: Option<Result<Request, ParseError>>,
    pending: usize,
    acked: usize,
}

impl Connection {
    pub fn new(shared: SharedState, send_capacity: usize) -> Self {
        Self {
            shared,
            send_capacity,
            state: ConnectionState::Accepted,
            buffer: BytesMut::with_capacity(RECV_BUFFER_CAPACITY),
            outcome: None,
            pending: 0,
            acked: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The parsed request, once the first segment has been processed.
    pub fn request(&self) -> Option<&Request> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        self.outcome.as_ref().and_then(|o| o.as_ref().err())
    }

    /// Length of the response handed to the transport, if one was produced.
    pub fn response_len(&self) -> Option<usize> {
        (self.pending > 0).then_some(self.pending)
    }

    pub fn on_accept(&mut self) -> Action {
        if self.state == ConnectionState::Accepted {
            self.state = ConnectionState::Receiving;
        }
        Action::Wait
    }

    /// Handles one received segment. An empty segment is a peer half-close.
    pub fn on_receive(&mut self, data: &[u8]) -> Action {
        if self.state != ConnectionState::Receiving {
            tracing::trace!(state = ?self.state, len = data.len(), "Ignoring data");
            return Action::Wait;
        }

        if data.is_empty() {
            tracing::debug!("Peer closed before sending a request");
            self.state = ConnectionState::Closed;
            return Action::Close;
        }

        let room = RECV_BUFFER_CAPACITY - self.buffer.len();
        self.buffer.extend_from_slice(&data[..data.len().min(room)]);

        self.state = ConnectionState::Processing;
        self.process()
    }

    /// Handles an acknowledgment for `len` bytes of the response.
    pub fn on_sent(&mut self, len: usize) -> Action {
        if self.state != ConnectionState::Sending {
            return Action::Wait;
        }

        self.acked += len;
        if self.acked < self.pending {
            return Action::Wait;
        }

        tracing::debug!(bytes = self.acked, "Response acknowledged, closing connection");
        self.state = ConnectionState::Closed;
        Action::Close
    }

    /// Handles a transport error. No response is attempted afterwards.
    pub fn on_error(&mut self, err: &TransportError) -> Action {
        if self.state.is_terminal() {
            return Action::Wait;
        }

        tracing::warn!(state = ?self.state, error = %err, "Transport error, aborting connection");
        self.state = ConnectionState::Error;
        self.buffer.clear();
        Action::Abort
    }

    fn process(&mut self) -> Action {
        let outcome = parse_request(&self.buffer);

        match &outcome {
            Ok(request) => {
                tracing::debug!(
                    method = %request.method,
                    path = %request.path,
                    version = %request.version,
                    "Parsed request line"
                );
                if let Some(command) = request.led_command() {
                    self.shared.set_led_enabled(command.enabled());
                    tracing::info!(enabled = command.enabled(), "LED toggled via web UI");
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Could not parse request line, serving dashboard");
            }
        }
        self.outcome = Some(outcome);

        let body = template::render(&self.shared.get_snapshot());
        let writer = ResponseWriter::new(Response::dashboard(body), self.send_capacity);
        if writer.truncated() {
            tracing::warn!(
                capacity = self.send_capacity,
                "Response truncated to fit send buffer"
            );
        }

        self.pending = writer.len();
        self.acked = 0;
        self.state = ConnectionState::Sending;
        Action::Send(writer)
    }

    /// Drives the exchange over `stream` until it closes or fails.
    ///
    /// Each read and write is bounded by `idle_timeout` when set; expiry is
    /// treated as a transport error.
    pub async fn run<S>(
        &mut self,
        stream: &mut S,
        idle_timeout: Option<Duration>,
    ) -> Result<(), TransportError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut chunk = [0u8; READ_CHUNK];
        let mut action = self.on_accept();

        loop {
            action = match action {
                Action::Wait => match idle(idle_timeout, stream.read(&mut chunk)).await {
                    Ok(n) => self.on_receive(&chunk[..n]),
                    Err(e) => {
                        self.on_error(&e);
                        return Err(e);
                    }
                },

                Action::Send(mut writer) => {
                    match idle(idle_timeout, writer.write_to_stream(stream)).await {
                        Ok(()) => self.on_sent(writer.len()),
                        Err(e) => {
                            self.on_error(&e);
                            return Err(e);
                        }
                    }
                }

                Action::Close => {
                    let _ = stream.shutdown().await;
                    return Ok(());
                }

                Action::Abort => return Err(TransportError::Aborted),
            };
        }
    }
}

async fn idle<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = io::Result<T>>,
) -> Result<T, TransportError> {
    match limit {
        Some(limit) => match timeout(limit, fut).await {
            Ok(res) => Ok(res?),
            Err(_) => Err(TransportError::TimedOut(limit)),
        },
        None => Ok(fut.await?),
    }
}
