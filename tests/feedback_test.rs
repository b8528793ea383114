use ramp_dev_mcp_rs::feedback::FeedbackClient;
use ramp_dev_mcp_rs::knowledge::ToolReply;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Answers a single HTTP request with `status_line` and hands back the request head.
async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let response = format!("{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&buf[..n]).into_owned()
    });

    (base_url, handle)
}

#[tokio::test]
async fn test_feedback_success_mentions_tool() {
    let (base_url, handle) = serve_once("HTTP/1.1 200 OK").await;
    let client = FeedbackClient::new(base_url).unwrap();

    let reply = client
        .submit("The schema tool is great", Some("get_endpoint_schema"))
        .await;
    assert_eq!(
        reply,
        ToolReply::Answer(
            "Feedback submitted successfully (regarding get_endpoint_schema tool)!".to_string()
        )
    );

    let request = handle.await.unwrap();
    assert!(request.starts_with("GET /v1/public/api-feedback/llm?"));
    assert!(request.contains("source=RAMP_MCP"));
    assert!(request.contains("feedback=The+schema+tool+is+great"));
}

#[tokio::test]
async fn test_feedback_bad_request_message() {
    let (base_url, handle) = serve_once("HTTP/1.1 400 Bad Request").await;
    let client = FeedbackClient::new(base_url).unwrap();

    let reply = client.submit("Something is off here", None).await;
    assert_eq!(
        reply,
        ToolReply::Failed(
            "Invalid feedback format. Please check your message and try again.".to_string()
        )
    );
    handle.await.unwrap();
}

#[tokio::test]
async fn test_feedback_server_error_message() {
    let (base_url, handle) = serve_once("HTTP/1.1 503 Service Unavailable").await;
    let client = FeedbackClient::new(base_url).unwrap();

    let reply = client.submit("Something is off here", None).await;
    assert!(reply.text().contains("temporarily unavailable"));
    handle.await.unwrap();
}
