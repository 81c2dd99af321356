use tokio::sync::mpsc::UnboundedSender;
use crate::bridge::layout::{GRANDMASTER_LED, MATRIX_PAGE_INDICATOR, PLAYBACK_PAGE_INDICATOR};
use crate::bridge::state::PageBank;
use crate::console_interface::{ConsoleAddress, ConsoleMessage};
use crate::midi_controller::midi_message::MidiMessage;
use crate::midi_controller::midi_pattern::{ControlChangePattern, MidiPattern, NoteOnPattern};
use crate::remote_session::requests::SessionRequest;

/// Outbound side of every handler. All sends are fire-and-forget.
#[derive(Clone)]
pub struct FeedbackHandle {
    pub console: UnboundedSender<ConsoleMessage>,
    pub midi: UnboundedSender<MidiMessage>,
    pub session: UnboundedSender<SessionRequest>,
}

impl FeedbackHandle {
    pub fn new(
        console: UnboundedSender<ConsoleMessage>,
        midi: UnboundedSender<MidiMessage>,
        session: UnboundedSender<SessionRequest>,
    ) -> Self {
        Self {
            console,
            midi,
            session,
        }
    }

    pub fn send_value(&self, address: ConsoleAddress, value: i32) {
        let _ = self.console.send(ConsoleMessage::Value { address, value });
    }

    pub fn send_command(&self, command: String) {
        let _ = self.console.send(ConsoleMessage::Command(command));
    }

    pub fn send_page_indicator(&self, bank: PageBank, page: u8) {
        let controller = match bank {
            PageBank::Matrix => MATRIX_PAGE_INDICATOR,
            PageBank::Playback => PLAYBACK_PAGE_INDICATOR,
        };
        let pattern = ControlChangePattern { controller };
        let _ = self.midi.send(pattern.create_output_message_from_state(&page));
    }

    pub fn send_grandmaster_led(&self, velocity: u8) {
        let pattern = NoteOnPattern { note: GRANDMASTER_LED };
        let _ = self.midi.send(pattern.create_output_message_from_state(&velocity));
    }

    pub fn send_session_request(&self, request: SessionRequest) {
        let _ = self.session.send(request);
    }
}
