pub mod connection;
pub mod midi_message;
pub mod midi_pattern;

pub use connection::Connection;
pub use midi_message::ControlEvent;
