use std::{fs, fs::File, io::Write};
use serde::{Serialize, Deserialize};
use crate::error::Result;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub midi_in_port_name: String,
    pub midi_out_port_name: String,
    pub osc_local_address: String,
    pub console_address: String,
    pub remote_session_url: String,
    pub video_width: Option<u32>,
    pub video_height: Option<u32>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            midi_in_port_name: String::from("MIDIcon 2"),
            midi_out_port_name: String::from("MIDIcon 2"),
            osc_local_address: String::from("127.0.0.1:8020"),
            console_address: String::from("127.0.0.1:8000"),
            remote_session_url: String::from("ws://localhost:8080/"),
            video_width: None,
            video_height: None,
        }
    }
}

impl Config {
    pub fn write_default_config_file(filename: &str) -> Result<()> {
        let default_config = Config::default();
        let serialized = serde_json::to_string_pretty(&default_config)?;

        let mut file = File::create(filename)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    pub fn read_from_config(file_name: &str) -> Result<Config> {
        let content = fs::read_to_string(file_name)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolution requested from the remote session once it reports its state.
    pub fn video_size(&self) -> (u32, u32) {
        (self.video_width.unwrap_or(2048), self.video_height.unwrap_or(1056))
    }
}
