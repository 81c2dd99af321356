use crate::midi_controller::midi_message::MidiMessage;

pub trait MidiPattern {
    type State;
    fn create_output_message_from_state(&self, state: &Self::State) -> MidiMessage;
}

/// Continuous-change indicator, e.g. the page number displays.
pub struct ControlChangePattern {
    pub controller: u8,
}

impl MidiPattern for ControlChangePattern {
    type State = u8;

    fn create_output_message_from_state(&self, value: &Self::State) -> MidiMessage {
        MidiMessage::control_change(self.controller, *value)
    }
}

/// Note-on driven LED, velocity is brightness.
pub struct NoteOnPattern {
    pub note: u8,
}

impl MidiPattern for NoteOnPattern {
    type State = u8;

    fn create_output_message_from_state(&self, velocity: &Self::State) -> MidiMessage {
        MidiMessage::note_on(self.note, *velocity)
    }
}
