//! HTTP control plane.
//!
//! A deliberately small subset of HTTP/1.1: only the request line is parsed,
//! every request is answered with the dashboard page, and every connection
//! carries exactly one exchange.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine and its async driver
//! - **`parser`**: parses the request line out of the first received segment
//! - **`request`**: the parsed request and the LED command it may carry
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: serializes a response, clamped to the send buffer capacity
//! - **`template`**: renders the dashboard from a state snapshot
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │  Accepted   │
//!        └──────┬──────┘
//!               │ on_accept
//!               ▼
//!        ┌─────────────┐  zero-length receive
//!        │  Receiving  │ ─────────────────────────┐
//!        └──────┬──────┘                          │
//!               │ first bytes                     │
//!               ▼                                 │
//!        ┌─────────────┐                          │
//!        │ Processing  │ ← parse, apply /set?led= │
//!        └──────┬──────┘                          │
//!               │ dashboard rendered              │
//!               ▼                                 │
//!        ┌─────────────┐                          │
//!        │   Sending   │                          │
//!        └──────┬──────┘                          │
//!               │ on_sent (fully acknowledged)    │
//!               ▼                                 │
//!        ┌─────────────┐                          │
//!        │   Closed    │ ◄────────────────────────┘
//!        └─────────────┘
//!
//!   on_error from any non-terminal state → Error (transport dropped, no response)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use hygro::http::connection::{Connection, SEND_BUFFER_CAPACITY};
//! use hygro::state::SharedState;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let state = SharedState::default();
//!
//!     loop {
//!         let (mut socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(state.clone(), SEND_BUFFER_CAPACITY);
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run(&mut socket, None).await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod template;
pub mod writer;
