use futures_util::stream::SplitStream;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_tungstenite::{connect_async, tungstenite, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream};
use tracing::{info, warn};
use url::Url;
use crate::error::{BridgeError, Result};
use crate::remote_session::requests::SessionRequest;

pub type SessionStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

pub struct Connection {
    pub rx: SessionStream,
}

impl Connection {
    /// Connects and starts forwarding queued requests into the socket as text frames.
    pub async fn new(url: &Url, requests: UnboundedReceiver<SessionRequest>) -> Result<Connection> {
        info!("Connecting to remote session at {} ...", url);
        let (ws_stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| BridgeError::SessionConnection(e.to_string()))?;
        info!("Remote session connected");

        let (socket_tx, socket_rx) = ws_stream.split();

        let frames = UnboundedReceiverStream::new(requests).filter_map(|request| async move {
            match request.to_json() {
                Ok(json) => Some(Ok::<_, tungstenite::Error>(Message::Text(json))),
                Err(e) => {
                    warn!("Could not serialize {:?}: {}", request, e);
                    None
                }
            }
        });
        tokio::spawn(frames.forward(socket_tx));

        Ok(Connection { rx: socket_rx })
    }
}
