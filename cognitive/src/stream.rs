//! Streaming speech recognition over WebSocket.
//!
//! The session protocol is a JSON text frame `{"action":"start", ...}`
//! followed by raw binary audio frames, then `{"action":"stop"}`. The
//! server answers with JSON text frames: `{"state":"listening"}`
//! acknowledgements, incremental `results` payloads, and `{"error":...}`
//! failures. A second listening acknowledgement after `stop` marks the end
//! of the utterance.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error};

use crate::{
    error::{Error, Result},
    http::HttpClient,
    speech_to_text::RecognitionResponse,
    types::{AudioFormat, Language, SampleRate},
};

/// Size of a single outbound audio frame.
pub const CHUNK_SIZE: usize = 4096;

/// Timeout for the WebSocket handshake. The receive path has no timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// ================== Configuration ==================

/// Streaming recognition configuration.
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Audio format.
    pub format: AudioFormat,
    /// Sample rate.
    pub sample_rate: SampleRate,
    /// Recognition model name.
    pub model: Option<String>,
    /// Language.
    pub language: Option<Language>,
    /// Deliver interim (non-final) results.
    pub interim_results: bool,
    /// Maximum number of alternatives per result.
    pub max_alternatives: Option<i32>,
    /// Include per-word timestamps.
    pub word_timestamps: bool,
}

// ================== Events ==================

/// An event delivered by a streaming recognition session.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// The server is ready for (more) audio.
    Listening,
    /// An interim or final recognition result.
    Transcription(RecognitionResponse),
    /// The socket was closed; no further events follow.
    Disconnected,
}

// ================== Session ==================

/// Streaming recognition session.
///
/// # Example
///
/// ```rust,no_run
/// use nimbus_cognitive::{Client, StreamConfig, RecognitionEvent};
///
/// # async fn example() -> nimbus_cognitive::Result<()> {
/// let client = Client::new("api-key")?;
/// let mut stream = client.speech_to_text().open_stream(&StreamConfig {
///     interim_results: true,
///     ..Default::default()
/// }).await?;
///
/// let audio = tokio::fs::File::open("audio.wav").await?;
/// stream.send_reader(audio).await?;
///
/// while let Some(event) = stream.recv().await {
///     match event? {
///         RecognitionEvent::Transcription(response) => {
///             if let Some(text) = response.transcript() {
///                 println!("{}", text);
///             }
///         }
///         RecognitionEvent::Disconnected => break,
///         _ => {}
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct RecognitionStream {
    write: Arc<Mutex<SplitSink<WsStream, WsMessage>>>,
    event_rx: mpsc::Receiver<Result<RecognitionEvent>>,
    stopped: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
    _read_handle: tokio::task::JoinHandle<()>,
}

impl RecognitionStream {
    /// Connects to the streaming recognition endpoint and sends the start
    /// control frame.
    ///
    /// Fails with [`Error::ConnectTimeout`] if the handshake does not
    /// complete within 10 seconds.
    pub(crate) async fn connect(http: Arc<HttpClient>, config: &StreamConfig) -> Result<Self> {
        let mut path = "/v1/recognize".to_string();
        if let Some(ref model) = config.model {
            path.push_str(&format!("?model={}", model));
        }

        let request = http.ws_request(&path)?;
        debug!("connecting to {}", path);

        let (ws_stream, _) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(request))
            .await
            .map_err(|_| Error::ConnectTimeout(CONNECT_TIMEOUT))?
            .map_err(Error::WebSocket)?;

        let (write, read) = ws_stream.split();

        let (event_tx, event_rx) = mpsc::channel(100);
        let stopped = Arc::new(AtomicBool::new(false));
        let closed = Arc::new(AtomicBool::new(false));

        let read_handle = tokio::spawn(receive_loop(
            read,
            event_tx,
            stopped.clone(),
            closed.clone(),
        ));

        let session = Self {
            write: Arc::new(Mutex::new(write)),
            event_rx,
            stopped,
            closed,
            _read_handle: read_handle,
        };

        session.send_start(config).await?;

        Ok(session)
    }

    /// Sends one binary audio frame.
    ///
    /// The write awaits completion on the underlying sink, so the caller is
    /// paced by the socket rather than by a fixed delay.
    pub async fn send_audio(&self, audio: &[u8]) -> Result<()> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(Error::Other("session closed".to_string()));
        }

        self.write
            .lock()
            .await
            .send(WsMessage::Binary(audio.to_vec().into()))
            .await
            .map_err(Error::WebSocket)
    }

    /// Streams an entire audio source in [`CHUNK_SIZE`] frames.
    ///
    /// Sends the stop control frame on clean end of input. A read failure
    /// aborts without sending stop.
    pub async fn send_reader<R>(&self, mut reader: R) -> Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            self.send_audio(&buf[..n]).await?;
        }
        self.stop().await
    }

    /// Sends the stop control frame, marking the end of the audio.
    ///
    /// Idempotent; only the first call emits a frame.
    pub async fn stop(&self) -> Result<()> {
        if self.stopped.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        self.send_text(&json!({"action": "stop"})).await
    }

    /// Receives the next session event.
    ///
    /// Returns `None` after [`RecognitionEvent::Disconnected`] has been
    /// delivered and the receive loop has ended.
    pub async fn recv(&mut self) -> Option<Result<RecognitionEvent>> {
        self.event_rx.recv().await
    }

    /// Closes the session.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        self.write
            .lock()
            .await
            .close()
            .await
            .map_err(Error::WebSocket)
    }

    async fn send_start(&self, config: &StreamConfig) -> Result<()> {
        let mut frame = json!({
            "action": "start",
            "content-type": config.format.content_type(config.sample_rate),
        });

        if let Some(lang) = config.language {
            frame["language"] = json!(lang.as_str());
        }
        if config.interim_results {
            frame["interim_results"] = json!(true);
        }
        if let Some(n) = config.max_alternatives {
            frame["max_alternatives"] = json!(n);
        }
        if config.word_timestamps {
            frame["timestamps"] = json!(true);
        }

        self.send_text(&frame).await
    }

    async fn send_text(&self, frame: &serde_json::Value) -> Result<()> {
        debug!("sending control frame: {}", frame);
        self.write
            .lock()
            .await
            .send(WsMessage::Text(frame.to_string().into()))
            .await
            .map_err(Error::WebSocket)
    }
}

// ================== Receive loop ==================

/// Reads inbound frames and dispatches them as session events.
async fn receive_loop(
    mut read: SplitStream<WsStream>,
    tx: mpsc::Sender<Result<RecognitionEvent>>,
    stopped: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
) {
    let mut listening = 0u32;

    while let Some(result) = read.next().await {
        match result {
            Ok(WsMessage::Text(text)) => match dispatch_text(&text, &stopped, &mut listening) {
                Dispatch::Event(event) => {
                    if tx.send(Ok(event)).await.is_err() {
                        break;
                    }
                }
                Dispatch::Error(e) => {
                    let _ = tx.send(Err(e)).await;
                    break;
                }
                Dispatch::Finished(event) => {
                    let _ = tx.send(Ok(event)).await;
                    break;
                }
                Dispatch::Ignore => {}
            },
            Ok(WsMessage::Close(_)) => {
                debug!("socket closed by server");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!("read error: {}", e);
                let _ = tx.send(Err(Error::WebSocket(e))).await;
                break;
            }
        }
    }

    closed.store(true, Ordering::Relaxed);
    let _ = tx.send(Ok(RecognitionEvent::Disconnected)).await;
}

enum Dispatch {
    Event(RecognitionEvent),
    Finished(RecognitionEvent),
    Error(Error),
    Ignore,
}

/// Classifies one inbound text frame.
fn dispatch_text(text: &str, stopped: &AtomicBool, listening: &mut u32) -> Dispatch {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => return Dispatch::Error(Error::Json(e)),
    };

    if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
        let code = value.get("code").and_then(|v| v.as_i64()).unwrap_or(0) as i32;
        return Dispatch::Error(Error::api(code, message, 0));
    }

    if value.get("results").is_some() {
        return match serde_json::from_value::<RecognitionResponse>(value) {
            Ok(response) => Dispatch::Event(RecognitionEvent::Transcription(response)),
            Err(e) => Dispatch::Error(Error::Json(e)),
        };
    }

    if value.get("state").is_some() {
        *listening += 1;
        // The listening acknowledgement after stop closes the utterance.
        if *listening > 1 && stopped.load(Ordering::Relaxed) {
            return Dispatch::Finished(RecognitionEvent::Listening);
        }
        return Dispatch::Event(RecognitionEvent::Listening);
    }

    Dispatch::Ignore
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_error_frame() {
        let stopped = AtomicBool::new(false);
        let mut listening = 0;
        match dispatch_text(r#"{"error": "x"}"#, &stopped, &mut listening) {
            Dispatch::Error(Error::Api { message, .. }) => assert_eq!(message, "x"),
            _ => panic!("expected api error"),
        }
    }

    #[test]
    fn test_dispatch_results_frame() {
        let stopped = AtomicBool::new(false);
        let mut listening = 0;
        let frame = r#"{"results": [{"alternatives": [{"transcript": "hi"}], "final": true}]}"#;
        match dispatch_text(frame, &stopped, &mut listening) {
            Dispatch::Event(RecognitionEvent::Transcription(response)) => {
                assert_eq!(response.transcript(), Some("hi"));
            }
            _ => panic!("expected transcription"),
        }
    }

    #[test]
    fn test_dispatch_listening_closes_after_stop() {
        let stopped = AtomicBool::new(true);
        let mut listening = 0;
        assert!(matches!(
            dispatch_text(r#"{"state": "listening"}"#, &stopped, &mut listening),
            Dispatch::Event(RecognitionEvent::Listening)
        ));
        assert!(matches!(
            dispatch_text(r#"{"state": "listening"}"#, &stopped, &mut listening),
            Dispatch::Finished(RecognitionEvent::Listening)
        ));
    }

    #[test]
    fn test_dispatch_parse_failure() {
        let stopped = AtomicBool::new(false);
        let mut listening = 0;
        assert!(matches!(
            dispatch_text("not json", &stopped, &mut listening),
            Dispatch::Error(Error::Json(_))
        ));
    }
}
