use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Truncates the body until head + body fit in `capacity` bytes.
///
/// Shrinking the body can only shorten the `Content-Length` digits, so the
/// head never grows and the loop settles after at most a couple of passes.
fn clamp_to_capacity(resp: &mut Response, capacity: usize) -> Vec<u8> {
    loop {
        let head = serialize_head(resp);
        if head.len() + resp.body.len() <= capacity || resp.body.is_empty() {
            return head;
        }
        resp.truncate_body(capacity.saturating_sub(head.len()));
    }
}

/// A fully serialized response, ready for the transport.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
    truncated: bool,
}

impl ResponseWriter {
    /// Serializes `response`, clamping it to the transport's send capacity.
    ///
    /// A short but well-formed response is preferred over exceeding the
    /// send buffer: the body is cut and `Content-Length` follows it.
    pub fn new(mut response: Response, capacity: usize) -> Self {
        let original = response.body.len();
        let head = clamp_to_capacity(&mut response, capacity);
        let truncated = response.body.len() < original;

        let mut buffer = head;
        buffer.extend_from_slice(&response.body);

        Self {
            buffer,
            written: 0,
            truncated,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True if the body had to be shortened to fit.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "connection closed while writing",
                ));
            }

            self.written += n;
        }

        stream.flush().await
    }
}
