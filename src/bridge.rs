//! Translation of control-surface events into console, surface and session output.

pub mod feedback_handle;
pub mod layout;
pub mod scaler;
pub mod state;

use tracing::debug;
use crate::console_interface::ConsoleAddress;
use crate::midi_controller::midi_message::ControlEvent;
use crate::remote_session::requests::{MouseEvent, SessionRequest};
use feedback_handle::FeedbackHandle;
use layout::{ControlRoute, NoteRoute, CONTROL_ROUTES, NOTE_ROUTES};
use state::{EncoderBank, GrandmasterState, PageBank, PageState, PageStep};

const PRESSED_VELOCITY: u8 = 127;

pub struct Bridge {
    pages: PageState,
    grandmaster: GrandmasterState,
    encoders: EncoderBank,
    feedback_handle: FeedbackHandle,
}

impl Bridge {
    pub fn new(feedback_handle: FeedbackHandle) -> Self {
        Self {
            pages: PageState::default(),
            grandmaster: GrandmasterState::default(),
            encoders: EncoderBank::default(),
            feedback_handle,
        }
    }

    /// Puts the surface indicators and the console on the current pages.
    pub fn sync_pages(&self) {
        self.feedback_handle.send_page_indicator(PageBank::Matrix, self.pages.matrix());
        self.feedback_handle.send_page_indicator(PageBank::Playback, self.pages.playback());
        self.feedback_handle.send_command(format!("Page {}", self.pages.matrix()));
    }

    pub fn handle_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::ContinuousChange { id, value } => self.handle_control_change(id, value),
            ControlEvent::Note { id, velocity } => self.handle_note(id, velocity),
        }
    }

    fn handle_control_change(&mut self, id: u8, value: u8) {
        match layout::resolve(CONTROL_ROUTES, id) {
            Some(ControlRoute::PlaybackFader) => {
                let address = ConsoleAddress::fader(self.pages.playback(), layout::PLAYBACK_FADER_BASE + id as u16);
                self.feedback_handle.send_value(address, scaler::scale(value) as i32);
            }
            Some(ControlRoute::Grandmaster) => {
                self.grandmaster.set_fader(value);
                if !self.grandmaster.is_blackout() {
                    self.emit_grandmaster();
                }
            }
            None => debug!("Unmapped control change {} = {}", id, value),
        }
    }

    fn handle_note(&mut self, id: u8, velocity: u8) {
        let pressed = velocity == PRESSED_VELOCITY;
        let Some(route) = layout::resolve(NOTE_ROUTES, id) else {
            debug!("Unmapped note {} ({})", id, velocity);
            return;
        };
        debug!("Note {} pressed={} -> {:?}", id, pressed, route);

        match route {
            NoteRoute::MatrixKey => {
                let address = ConsoleAddress::key(self.pages.matrix(), layout::matrix_key(id));
                self.feedback_handle.send_value(address, pressed as i32);
            }
            NoteRoute::PlaybackKey { offset, base_key } => {
                let address = ConsoleAddress::key(self.pages.playback(), layout::playback_key(id, offset, base_key));
                self.feedback_handle.send_value(address, pressed as i32);
            }
            NoteRoute::PlaybackPageUp if pressed => self.step_page(PageBank::Playback, PageStep::Up),
            NoteRoute::PlaybackPageDown if pressed => self.step_page(PageBank::Playback, PageStep::Down),
            NoteRoute::MatrixPageUp if pressed => self.step_page(PageBank::Matrix, PageStep::Up),
            NoteRoute::MatrixPageDown if pressed => self.step_page(PageBank::Matrix, PageStep::Down),
            NoteRoute::PlaybackPageUp
            | NoteRoute::PlaybackPageDown
            | NoteRoute::MatrixPageUp
            | NoteRoute::MatrixPageDown => {}
            NoteRoute::SelectEncoderBank => {
                self.feedback_handle
                    .send_command(format!("Select EncoderBank {}", id - layout::SELECT_ENCODER_BANK_OFFSET));
            }
            NoteRoute::Blackout => self.toggle_blackout(),
            NoteRoute::SessionWheel => self.scroll_session(id),
            NoteRoute::PlaybackEncoder => self.turn_playback_encoder(id),
        }
    }

    fn step_page(&mut self, bank: PageBank, step: PageStep) {
        let page = self.pages.step(bank, step);
        self.feedback_handle.send_page_indicator(bank, page);
        if bank == PageBank::Matrix {
            self.feedback_handle.send_command(format!("Page {}", page));
        }
    }

    fn toggle_blackout(&mut self) {
        let blackout = self.grandmaster.toggle_blackout();
        debug!("Blackout {}, level {}", if blackout { "on" } else { "off" }, self.grandmaster.level());
        self.emit_grandmaster();
    }

    fn emit_grandmaster(&self) {
        self.feedback_handle.send_grandmaster_led(self.grandmaster.led_velocity());
        self.feedback_handle
            .send_command(format!("Master 2.1 At {}", self.grandmaster.output_level()));
    }

    fn turn_playback_encoder(&mut self, note: u8) {
        let page = self.pages.playback();
        let index = layout::playback_encoder_index(note);
        let value = self.encoders.apply(page, index, layout::rotation_delta(note));
        let address = ConsoleAddress::fader(page, layout::PLAYBACK_ENCODER_BASE + index as u16);
        self.feedback_handle.send_value(address, value as i32);
    }

    fn scroll_session(&self, note: u8) {
        let encoder = layout::session_wheel_encoder(note);
        let pos_x = layout::SESSION_WHEEL_X[encoder - 1];
        self.feedback_handle.send_session_request(SessionRequest::NextFrame);
        self.feedback_handle.send_session_request(SessionRequest::MouseEvent(MouseEvent::wheel(
            pos_x,
            layout::SESSION_WHEEL_Y,
            layout::rotation_delta(note),
        )));
    }
}
