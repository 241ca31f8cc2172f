//! Integration tests for streaming recognition against an in-process
//! mock WebSocket server.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, ReadBuf};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use crate::stream::CHUNK_SIZE;
use crate::{Client, RecognitionEvent, StreamConfig};

// ============================================================================
// Mock server
// ============================================================================

/// A frame captured by the mock server, in arrival order.
#[derive(Debug, Clone, PartialEq)]
enum Captured {
    Text(String),
    Binary(Vec<u8>),
}

impl Captured {
    fn action(&self) -> Option<String> {
        match self {
            Captured::Text(text) => serde_json::from_str::<serde_json::Value>(text)
                .ok()
                .and_then(|v| v.get("action").and_then(|a| a.as_str()).map(String::from)),
            Captured::Binary(_) => None,
        }
    }
}

/// Scripted replies of the mock server.
#[derive(Default)]
struct ServerScript {
    /// Text frames sent after the start control frame arrives.
    on_start: Vec<String>,
    /// Text frames sent after the stop control frame arrives; the server
    /// closes the socket afterwards.
    on_stop: Vec<String>,
}

const LISTENING: &str = r#"{"state": "listening"}"#;

/// Accepts a single session and replays the script, capturing all inbound
/// frames.
async fn start_mock_server(script: ServerScript) -> (String, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let mut captured = Vec::new();

        while let Some(msg) = ws.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let frame = Captured::Text(text.to_string());
                    let action = frame.action();
                    captured.push(frame);

                    match action.as_deref() {
                        Some("start") => {
                            for reply in &script.on_start {
                                ws.send(Message::Text(reply.clone().into())).await.unwrap();
                            }
                        }
                        Some("stop") => {
                            for reply in &script.on_stop {
                                ws.send(Message::Text(reply.clone().into())).await.unwrap();
                            }
                            let _ = ws.close(None).await;
                            break;
                        }
                        _ => {}
                    }
                }
                Ok(Message::Binary(data)) => captured.push(Captured::Binary(data.to_vec())),
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }

        captured
    });

    (format!("ws://{}", addr), handle)
}

async fn connect(ws_url: &str) -> crate::RecognitionStream {
    let client = Client::builder("test-key").ws_url(ws_url).build().unwrap();
    client
        .speech_to_text()
        .open_stream(&StreamConfig::default())
        .await
        .unwrap()
}

/// Drains all events until the receive loop ends.
async fn drain(stream: &mut crate::RecognitionStream) -> Vec<crate::Result<RecognitionEvent>> {
    let mut events = Vec::new();
    while let Some(event) = stream.recv().await {
        let done = matches!(event, Ok(RecognitionEvent::Disconnected));
        events.push(event);
        if done {
            break;
        }
    }
    events
}

// ============================================================================
// Frame sequence properties
// ============================================================================

#[tokio::test]
async fn test_short_input_sends_single_exact_frame() {
    let (url, server) = start_mock_server(ServerScript {
        on_start: vec![LISTENING.to_string()],
        on_stop: vec![LISTENING.to_string()],
    })
    .await;

    let audio = vec![7u8; 100];
    let mut stream = connect(&url).await;
    stream.send_reader(io::Cursor::new(audio.clone())).await.unwrap();
    drain(&mut stream).await;

    let captured = server.await.unwrap();
    let binary: Vec<_> = captured
        .iter()
        .filter_map(|f| match f {
            Captured::Binary(b) => Some(b.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(binary.len(), 1);
    assert_eq!(binary[0], audio);
}

#[tokio::test]
async fn test_chunking_reproduces_input() {
    let (url, server) = start_mock_server(ServerScript {
        on_start: vec![LISTENING.to_string()],
        on_stop: vec![LISTENING.to_string()],
    })
    .await;

    // 2 full chunks plus a partial tail.
    let audio: Vec<u8> = (0..CHUNK_SIZE * 2 + 1808).map(|i| (i % 251) as u8).collect();
    let mut stream = connect(&url).await;
    stream.send_reader(io::Cursor::new(audio.clone())).await.unwrap();
    drain(&mut stream).await;

    let captured = server.await.unwrap();
    let binary: Vec<_> = captured
        .iter()
        .filter_map(|f| match f {
            Captured::Binary(b) => Some(b.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(binary.len(), audio.len().div_ceil(CHUNK_SIZE));
    assert!(binary[..binary.len() - 1].iter().all(|b| b.len() == CHUNK_SIZE));
    assert_eq!(binary.concat(), audio);
}

#[tokio::test]
async fn test_control_frames_bracket_audio() {
    let (url, server) = start_mock_server(ServerScript {
        on_start: vec![LISTENING.to_string()],
        on_stop: vec![LISTENING.to_string()],
    })
    .await;

    let mut stream = connect(&url).await;
    stream
        .send_reader(io::Cursor::new(vec![1u8; CHUNK_SIZE + 5]))
        .await
        .unwrap();
    drain(&mut stream).await;

    let captured = server.await.unwrap();

    assert_eq!(captured.first().unwrap().action().as_deref(), Some("start"));
    assert_eq!(captured.last().unwrap().action().as_deref(), Some("stop"));

    // Every binary frame sits strictly between the two control frames.
    let control_count = captured.iter().filter(|f| f.action().is_some()).count();
    assert_eq!(control_count, 2);
    assert!(
        captured[1..captured.len() - 1]
            .iter()
            .all(|f| matches!(f, Captured::Binary(_)))
    );
}

// ============================================================================
// Inbound dispatch properties
// ============================================================================

#[tokio::test]
async fn test_transcription_event_deserialized() {
    let result_frame = r#"{
        "result_index": 0,
        "results": [{
            "final": true,
            "alternatives": [{"transcript": "hello world", "confidence": 0.9}]
        }]
    }"#;

    let (url, _server) = start_mock_server(ServerScript {
        on_start: vec![LISTENING.to_string()],
        on_stop: vec![result_frame.to_string(), LISTENING.to_string()],
    })
    .await;

    let mut stream = connect(&url).await;
    stream.send_reader(io::Cursor::new(vec![0u8; 64])).await.unwrap();
    let events = drain(&mut stream).await;

    let transcript = events.iter().find_map(|e| match e {
        Ok(RecognitionEvent::Transcription(response)) => {
            Some(response.transcript().unwrap().to_string())
        }
        _ => None,
    });
    assert_eq!(transcript.as_deref(), Some("hello world"));

    let final_flag = events.iter().any(|e| {
        matches!(e, Ok(RecognitionEvent::Transcription(r)) if r.results[0].is_final)
    });
    assert!(final_flag);

    assert!(matches!(
        events.last().unwrap(),
        Ok(RecognitionEvent::Disconnected)
    ));
}

#[tokio::test]
async fn test_error_frame_reaches_caller_without_transcription() {
    let (url, _server) = start_mock_server(ServerScript {
        on_start: vec![LISTENING.to_string(), r#"{"error": "x"}"#.to_string()],
        on_stop: vec![],
    })
    .await;

    let mut stream = connect(&url).await;
    let _ = stream.send_reader(io::Cursor::new(vec![0u8; 64])).await;
    let events = drain(&mut stream).await;
    stream.close().await.unwrap();

    let error_message = events.iter().find_map(|e| match e {
        Err(crate::Error::Api { message, .. }) => Some(message.clone()),
        _ => None,
    });
    assert_eq!(error_message.as_deref(), Some("x"));

    assert!(
        !events
            .iter()
            .any(|e| matches!(e, Ok(RecognitionEvent::Transcription(_))))
    );
}

// ============================================================================
// Input failure handling
// ============================================================================

/// Reader that yields its chunks, then fails instead of reporting EOF.
struct FailingReader {
    chunks: Vec<Vec<u8>>,
    index: usize,
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.index < self.chunks.len() {
            let chunk = self.chunks[self.index].clone();
            buf.put_slice(&chunk);
            self.index += 1;
            Poll::Ready(Ok(()))
        } else {
            Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "input stream closed",
            )))
        }
    }
}

#[tokio::test]
async fn test_input_failure_does_not_send_stop() {
    let (url, server) = start_mock_server(ServerScript {
        on_start: vec![LISTENING.to_string()],
        on_stop: vec![],
    })
    .await;

    let stream = connect(&url).await;
    let reader = FailingReader {
        chunks: vec![vec![5u8; 1000]],
        index: 0,
    };

    let result = stream.send_reader(reader).await;
    assert!(matches!(result, Err(crate::Error::Io(_))));

    stream.close().await.unwrap();
    let captured = server.await.unwrap();

    // One start frame, one binary frame, and no stop frame.
    let actions: Vec<_> = captured.iter().filter_map(|f| f.action()).collect();
    assert_eq!(actions, vec!["start".to_string()]);
    assert_eq!(
        captured
            .iter()
            .filter(|f| matches!(f, Captured::Binary(_)))
            .count(),
        1
    );
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let (url, server) = start_mock_server(ServerScript {
        on_start: vec![LISTENING.to_string()],
        on_stop: vec![LISTENING.to_string()],
    })
    .await;

    let mut stream = connect(&url).await;
    stream.send_audio(&[1, 2, 3]).await.unwrap();
    stream.stop().await.unwrap();
    stream.stop().await.unwrap();
    drain(&mut stream).await;

    let captured = server.await.unwrap();
    let stops = captured
        .iter()
        .filter(|f| f.action().as_deref() == Some("stop"))
        .count();
    assert_eq!(stops, 1);
}
