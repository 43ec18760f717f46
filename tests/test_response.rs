use hygro::http::response::{CONTENT_TYPE_HTML, Response, ResponseBuilder, StatusCode};
use hygro::http::writer::ResponseWriter;

fn split_head(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header terminator");
    (
        String::from_utf8(raw[..end].to_vec()).unwrap(),
        raw[end + 4..].to_vec(),
    )
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|l| l.strip_prefix("Content-Length: "))
        .expect("Content-Length header")
        .parse()
        .unwrap()
}

#[test]
fn test_status_code() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
}

#[test]
fn test_builder_derives_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"This is the body".to_vec())
        .build();

    assert_eq!(response.header("Content-Length"), Some("16"));
}

#[test]
fn test_builder_ignores_explicit_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("content-length"), Some("4"));
}

#[test]
fn test_builder_replaces_duplicate_header() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers.len(), 2);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
}

#[test]
fn test_dashboard_headers() {
    let response = Response::dashboard(b"<p>hi</p>".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some(CONTENT_TYPE_HTML));
    assert_eq!(response.header("Connection"), Some("close"));
    assert_eq!(response.header("Content-Length"), Some("9"));
}

#[test]
fn test_truncate_body_updates_content_length() {
    let mut response = Response::dashboard(vec![b'x'; 100]);
    response.truncate_body(10);

    assert_eq!(response.body.len(), 10);
    assert_eq!(response.header("Content-Length"), Some("10"));
}

#[test]
fn test_writer_serializes_in_order() {
    let writer = ResponseWriter::new(Response::dashboard(b"hello".to_vec()), 4096);

    let expected = "HTTP/1.1 200 OK\r\n\
                    Content-Type: text/html; charset=UTF-8\r\n\
                    Connection: close\r\n\
                    Content-Length: 5\r\n\
                    \r\n\
                    hello";
    assert_eq!(writer.as_bytes(), expected.as_bytes());
    assert!(!writer.truncated());
}

#[test]
fn test_writer_clamps_to_capacity() {
    let writer = ResponseWriter::new(Response::dashboard(vec![b'x'; 1000]), 300);

    assert!(writer.truncated());
    assert!(writer.len() <= 300);

    let (head, body) = split_head(writer.as_bytes());
    assert_eq!(content_length(&head), body.len());
}

#[test]
fn test_writer_clamp_shrinking_length_digits() {
    // Cutting 10_000 bytes down to a three-digit length shortens the header
    // itself; the result must still be self-consistent.
    let writer = ResponseWriter::new(Response::dashboard(vec![b'x'; 10_000]), 256);

    let (head, body) = split_head(writer.as_bytes());
    assert!(writer.len() <= 256);
    assert_eq!(content_length(&head), body.len());
}

#[test]
fn test_writer_capacity_smaller_than_head() {
    let writer = ResponseWriter::new(Response::dashboard(b"body".to_vec()), 10);

    let (head, body) = split_head(writer.as_bytes());
    assert!(body.is_empty());
    assert_eq!(content_length(&head), 0);
}

#[tokio::test]
async fn test_writer_writes_to_stream() {
    let (mut client, mut server) = tokio::io::duplex(64);
    let mut writer = ResponseWriter::new(Response::dashboard(vec![b'y'; 500]), 4096);
    let expected = writer.as_bytes().to_vec();

    let reader = tokio::spawn(async move {
        use tokio::io::AsyncReadExt;
        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        out
    });

    writer.write_to_stream(&mut server).await.unwrap();
    drop(server);

    assert_eq!(reader.await.unwrap(), expected);
}
