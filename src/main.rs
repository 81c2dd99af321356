mod bridge;
mod config;
mod console_interface;
mod error;
mod midi_controller;
mod remote_session;

use anyhow::Result;
use bridge::feedback_handle::FeedbackHandle;
use bridge::Bridge;
use clap::Parser;
use config::Config;
use futures_util::StreamExt;
use midi_controller::{Connection, ControlEvent};
use remote_session::RemoteSession;
use std::path::Path;
use tokio::sync::mpsc::unbounded_channel;
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Bridges a MIDIcon style surface to a grandMA3 console (OSC) and its remote session.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "midicon.json")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// List available MIDI ports and exit
    #[arg(long)]
    list_ports: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    if args.list_ports {
        let (inputs, outputs) = Connection::list_ports()?;
        print!("{}", format_port_list(&inputs, &outputs));
        return Ok(());
    }

    match Connection::list_ports() {
        Ok((inputs, outputs)) => {
            info!("MIDI inputs: {:?}", inputs);
            info!("MIDI outputs: {:?}", outputs);
        }
        Err(e) => warn!("Could not list MIDI ports: {}", e),
    }

    let config = get_config(&args.config);
    let session_url = Url::parse(&config.remote_session_url)?;

    let (console_tx, console_rx) = unbounded_channel();
    let (session_tx, session_rx) = unbounded_channel();
    tokio::spawn(console_interface::run_sender(
        config.osc_local_address.clone(),
        config.console_address.clone(),
        console_rx,
    ));

    let (mut midi_connection, mut midi_channels) = Connection::open(&config);
    let mut bridge = Bridge::new(FeedbackHandle::new(console_tx, midi_channels.sender.clone(), session_tx.clone()));
    bridge.sync_pages();

    let mut session = RemoteSession::new(session_tx, config.video_size());
    let mut session_connection = match remote_session::connection::Connection::new(&session_url, session_rx).await {
        Ok(connection) => connection,
        Err(e) => {
            session.on_error(&e);
            info!("Remote session closed");
            midi_connection.close();
            return Ok(());
        }
    };
    session.on_open();

    loop {
        tokio::select! {
            Some(message) = midi_channels.receiver.recv() => {
                if let Some(event) = ControlEvent::from_message(&message) {
                    bridge.handle_event(event);
                }
            }
            frame = session_connection.rx.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => session.receive_text_or_warn(&text),
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => session.on_error(e),
                }
            }
        }
    }

    info!("Remote session closed ({:?})", session.state());
    midi_connection.close();
    Ok(())
}

fn get_config(config_file_name: &str) -> Config {
    match Config::read_from_config(config_file_name) {
        Ok(config) => config,
        Err(err) => {
            error!("Error while reading config file {}: {}", config_file_name, err);
            if !Path::new(config_file_name).exists() {
                if let Err(e) = Config::write_default_config_file(config_file_name) {
                    warn!("Could not write default config file {}: {}", config_file_name, e);
                }
            }
            Config::default()
        }
    }
}

fn format_port_list(inputs: &[String], outputs: &[String]) -> String {
    let mut listing = String::from("MIDI inputs:\n");
    for (index, name) in inputs.iter().enumerate() {
        listing.push_str(&format!("  [{}] {}\n", index, name));
    }
    listing.push_str("MIDI outputs:\n");
    for (index, name) in outputs.iter().enumerate() {
        listing.push_str(&format!("  [{}] {}\n", index, name));
    }
    listing
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
