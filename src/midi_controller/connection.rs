use std::thread::JoinHandle;
use midir::{MidiInput, MidiInputConnection, MidiIO, MidiOutput, MidiOutputConnection};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};
use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::midi_controller::midi_message::MidiMessage;

pub struct Connection {
    midi_connection_rx: Option<MidiInputConnection<()>>,
    _sender_thread: JoinHandle<()>,
}

pub struct TxRxChannels {
    pub sender: UnboundedSender<MidiMessage>,
    pub receiver: UnboundedReceiver<MidiMessage>,
}

impl Connection {
    /// Opens input and output independently. A side that fails to open is
    /// logged and stays inert: no events arrive, feedback is dropped.
    pub fn open(config: &Config) -> (Self, TxRxChannels) {
        let (midi_rx_sender, midi_rx_receiver) = unbounded_channel();
        let (midi_tx_sender, midi_tx_receiver) = unbounded_channel();

        let midi_connection_rx = match Self::connect_input(&config.midi_in_port_name, midi_rx_sender) {
            Ok(connection) => {
                info!("MIDI input connected: {}", config.midi_in_port_name);
                Some(connection)
            }
            Err(e) => {
                error!("Could not open MIDI input {}: {}", config.midi_in_port_name, e);
                None
            }
        };

        let sender_thread = Self::spawn_sender(config.midi_out_port_name.clone(), midi_tx_receiver);

        (
            Self {
                midi_connection_rx,
                _sender_thread: sender_thread,
            },
            TxRxChannels {
                receiver: midi_rx_receiver,
                sender: midi_tx_sender,
            },
        )
    }

    pub fn list_ports() -> Result<(Vec<String>, Vec<String>)> {
        let midi_in = MidiInput::new("MidiconMA scanner").map_err(|e| BridgeError::Midi(e.to_string()))?;
        let midi_out = MidiOutput::new("MidiconMA scanner").map_err(|e| BridgeError::Midi(e.to_string()))?;
        Ok((Self::port_names(&midi_in), Self::port_names(&midi_out)))
    }

    /// Stops input delivery. The surface is released before the process exits.
    pub fn close(&mut self) {
        if let Some(connection) = self.midi_connection_rx.take() {
            let _ = connection.close();
        }
    }

    fn connect_input(port_name: &str, sink: UnboundedSender<MidiMessage>) -> Result<MidiInputConnection<()>> {
        let mut midi_in = MidiInput::new(&("MidiconMA in ".to_owned() + port_name))
            .map_err(|e| BridgeError::Midi(e.to_string()))?;
        midi_in.ignore(midir::Ignore::All);
        let port_in = Self::find_midi_port(&midi_in, port_name)?;

        midi_in
            .connect(&port_in, port_name, move |_stamp, message, _| {
                match MidiMessage::from_slice(message) {
                    Ok(message) => {
                        let _ = sink.send(message);
                    }
                    Err(_) => debug!("Dropping {} byte MIDI message", message.len()),
                }
            }, ())
            .map_err(|e| BridgeError::Midi(e.to_string()))
    }

    fn connect_output(port_name: &str) -> Result<MidiOutputConnection> {
        let midi_out = MidiOutput::new(&("MidiconMA out ".to_owned() + port_name))
            .map_err(|e| BridgeError::Midi(e.to_string()))?;
        let port_out = Self::find_midi_port(&midi_out, port_name)?;
        midi_out
            .connect(&port_out, port_name)
            .map_err(|e| BridgeError::Midi(e.to_string()))
    }

    fn find_midi_port<T: MidiIO>(midi: &T, port_name: &str) -> Result<T::Port> {
        for port in midi.ports() {
            if let Ok(name) = midi.port_name(&port) {
                if name.eq_ignore_ascii_case(port_name) {
                    return Ok(port);
                }
            }
        }
        Err(BridgeError::MidiPortNotFound(port_name.to_string()))
    }

    fn port_names<T: MidiIO>(midi: &T) -> Vec<String> {
        midi.ports()
            .iter()
            .filter_map(|port| midi.port_name(port).ok())
            .collect()
    }

    /// midir connections aren't Send everywhere, so the output is opened and
    /// driven from its own thread. It ends once every sender is dropped.
    fn spawn_sender(port_name: String, mut source: UnboundedReceiver<MidiMessage>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            let mut sink_connection = match Self::connect_output(&port_name) {
                Ok(connection) => {
                    info!("MIDI output connected: {}", port_name);
                    Some(connection)
                }
                Err(e) => {
                    error!("Could not open MIDI output {}: {}", port_name, e);
                    None
                }
            };
            while let Some(message) = source.blocking_recv() {
                if let Some(connection) = sink_connection.as_mut() {
                    let _ = connection.send(&message.data);
                }
            }
        })
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
