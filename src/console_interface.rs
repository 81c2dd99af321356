//! OSC side of the bridge: addressed values and free-text commands for the
//! lighting console, sent over UDP.

use std::fmt::{Display, Formatter};
use rosc::{OscMessage, OscPacket, OscType};
use tokio::net::UdpSocket;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info};
use crate::error::{BridgeError, Result};

const COMMAND_ADDRESS: &str = "/cmd";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Fader(u16),
    Key(u16),
}

/// A page-scoped console control, rendered as `/Page{P}/Fader{F}` or `/Page{P}/Key{K}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleAddress {
    pub page: u8,
    pub control: Control,
}

impl ConsoleAddress {
    pub fn fader(page: u8, fader: u16) -> Self {
        Self { page, control: Control::Fader(fader) }
    }

    pub fn key(page: u8, key: u16) -> Self {
        Self { page, control: Control::Key(key) }
    }
}

impl Display for ConsoleAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.control {
            Control::Fader(fader) => write!(f, "/Page{}/Fader{}", self.page, fader),
            Control::Key(key) => write!(f, "/Page{}/Key{}", self.page, key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleMessage {
    Value { address: ConsoleAddress, value: i32 },
    Command(String),
}

impl ConsoleMessage {
    pub fn to_packet(&self) -> OscPacket {
        let message = match self {
            ConsoleMessage::Value { address, value } => OscMessage {
                addr: address.to_string(),
                args: vec![OscType::Int(*value)],
            },
            ConsoleMessage::Command(command) => OscMessage {
                addr: COMMAND_ADDRESS.to_string(),
                args: vec![OscType::String(command.clone())],
            },
        };
        OscPacket::Message(message)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        rosc::encoder::encode(&self.to_packet()).map_err(|e| BridgeError::OscEncode(format!("{:?}", e)))
    }
}

/// Drains console messages into the UDP socket until every sender is gone.
/// If the local socket can't be bound the console side stays inert.
pub async fn run_sender(local_address: String, console_address: String, mut source: UnboundedReceiver<ConsoleMessage>) {
    let socket = match UdpSocket::bind(&local_address).await {
        Ok(socket) => {
            info!("OSC socket bound on {}, sending to {}", local_address, console_address);
            Some(socket)
        }
        Err(e) => {
            error!("Could not bind OSC socket on {}: {}", local_address, e);
            None
        }
    };

    while let Some(message) = source.recv().await {
        let Some(socket) = socket.as_ref() else { continue };
        match message.encode() {
            Ok(bytes) => {
                if let Err(e) = socket.send_to(&bytes, console_address.as_str()).await {
                    debug!("OSC send to {} failed: {}", console_address, e);
                }
            }
            Err(e) => debug!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_address_rendering() {
        assert_eq!(ConsoleAddress::fader(3, 204).to_string(), "/Page3/Fader204");
        assert_eq!(ConsoleAddress::key(1, 416).to_string(), "/Page1/Key416");
    }

    #[test]
    fn test_command_packet() {
        let packet = ConsoleMessage::Command("Master 2.1 At 57".to_string()).to_packet();
        match packet {
            OscPacket::Message(m) => {
                assert_eq!(m.addr, "/cmd");
                assert_eq!(m.args, vec![OscType::String("Master 2.1 At 57".to_string())]);
            }
            _ => panic!("Expected message, got bundle"),
        }
    }

    #[tokio::test]
    async fn test_sender_delivers_to_console() {
        let console = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let console_address = console.local_addr().unwrap().to_string();
        let (tx, rx) = unbounded_channel();
        let task = tokio::spawn(run_sender("127.0.0.1:0".to_string(), console_address, rx));

        tx.send(ConsoleMessage::Value { address: ConsoleAddress::key(2, 191), value: 1 }).unwrap();

        let mut buf = vec![0u8; 1024];
        let (len, _) = tokio::time::timeout(std::time::Duration::from_secs(2), console.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        let (_, packet) = rosc::decoder::decode_udp(&buf[..len]).unwrap();
        match packet {
            OscPacket::Message(m) => {
                assert_eq!(m.addr, "/Page2/Key191");
                assert_eq!(m.args, vec![OscType::Int(1)]);
            }
            _ => panic!("Expected message, got bundle"),
        }

        drop(tx);
        task.await.unwrap();
    }
}
