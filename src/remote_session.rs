//! Persistent connection to the remote video/preview session.
//!
//! The session only renders on demand: after the handshake every frame marker
//! it sends is answered with a `nextFrame` request.

pub mod connection;
pub mod requests;
pub mod responses;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};
use crate::error::Result;
use requests::SessionRequest;
use responses::SessionMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    AwaitingReady,
    Ready,
    Streaming,
}

pub struct RemoteSession {
    state: SessionState,
    requests: UnboundedSender<SessionRequest>,
    video_size: (u32, u32),
}

impl RemoteSession {
    pub fn new(requests: UnboundedSender<SessionRequest>, video_size: (u32, u32)) -> Self {
        Self {
            state: SessionState::Disconnected,
            requests,
            video_size,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn on_open(&mut self) {
        self.send(SessionRequest::RemoteState);
        self.state = SessionState::AwaitingReady;
    }

    /// Handles one inbound text frame. A payload that fails to parse is
    /// rejected without touching the session state.
    pub fn receive_text(&mut self, text: &str) -> Result<()> {
        let message: SessionMessage = serde_json::from_str(text)?;

        if message.is_server_ready() {
            info!("Remote session server ready");
            self.send(SessionRequest::RemoteState);
            if self.state == SessionState::AwaitingReady {
                self.state = SessionState::Ready;
            }
        }

        if message.is_remote_state() {
            info!("Remote state received, requesting video");
            let (width, height) = self.video_size;
            self.send(SessionRequest::ResizeVideo { width, height });
            self.send(SessionRequest::RequestVideo);
            self.state = SessionState::Streaming;
        }

        if message.is_frame_marker() && self.state == SessionState::Streaming {
            debug!("Frame marker {:?}", message);
            self.send(SessionRequest::NextFrame);
        }

        Ok(())
    }

    pub fn receive_text_or_warn(&mut self, text: &str) {
        if let Err(e) = self.receive_text(text) {
            warn!("Ignoring malformed session payload: {}", e);
        }
    }

    pub fn on_error<E: std::fmt::Display>(&self, error: E) {
        error!("Remote session connection error: {}", error);
    }

    fn send(&self, request: SessionRequest) {
        let _ = self.requests.send(request);
    }
}
