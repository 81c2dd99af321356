use std::array::TryFromSliceError;

const CONTROL_CHANGE: u8 = 0xB0;
const NOTE_ON: u8 = 0x90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiMessage {
    pub data: [u8; 3],
}

impl MidiMessage {
    pub fn from_slice(slice: &[u8]) -> Result<MidiMessage, TryFromSliceError> {
        let data: [u8; 3] = slice.try_into()?;
        Ok(MidiMessage { data })
    }

    pub fn control_change(controller: u8, value: u8) -> MidiMessage {
        MidiMessage { data: [CONTROL_CHANGE, controller & 0x7F, value & 0x7F] }
    }

    pub fn note_on(note: u8, velocity: u8) -> MidiMessage {
        MidiMessage { data: [NOTE_ON, note & 0x7F, velocity & 0x7F] }
    }
}

/// One physical action on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    ContinuousChange { id: u8, value: u8 },
    Note { id: u8, velocity: u8 },
}

impl ControlEvent {
    /// Channel is ignored. Note-off status bytes yield nothing; the surface
    /// reports releases as note-on with velocity 0.
    pub fn from_message(message: &MidiMessage) -> Option<ControlEvent> {
        let [status, id, value] = message.data;
        match status & 0xF0 {
            CONTROL_CHANGE => Some(ControlEvent::ContinuousChange { id: id & 0x7F, value: value & 0x7F }),
            NOTE_ON => Some(ControlEvent::Note { id: id & 0x7F, velocity: value & 0x7F }),
            _ => None,
        }
    }
}
