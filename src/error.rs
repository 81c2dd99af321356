use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("midi port not found: {0}")]
    MidiPortNotFound(String),

    #[error("midi error: {0}")]
    Midi(String),

    #[error("remote session connection failed: {0}")]
    SessionConnection(String),

    #[error("osc encode error: {0}")]
    OscEncode(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
