use crate::bridge::layout::{ENCODERS_PER_PAGE, MAX_PAGE};
use crate::bridge::scaler::scale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBank {
    Matrix,
    Playback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Up,
    Down,
}

/// Matrix and playback pages move independently and clamp to `1..=MAX_PAGE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    matrix: u8,
    playback: u8,
}

impl Default for PageState {
    fn default() -> Self {
        Self { matrix: 1, playback: 1 }
    }
}

impl PageState {
    pub fn matrix(&self) -> u8 {
        self.matrix
    }

    pub fn playback(&self) -> u8 {
        self.playback
    }

    pub fn step(&mut self, bank: PageBank, step: PageStep) -> u8 {
        let page = match bank {
            PageBank::Matrix => &mut self.matrix,
            PageBank::Playback => &mut self.playback,
        };
        *page = match step {
            PageStep::Up => (*page + 1).min(MAX_PAGE),
            PageStep::Down => page.saturating_sub(1).max(1),
        };
        *page
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrandmasterState {
    level: u8,
    fader_position: u8,
    blackout: bool,
}

impl Default for GrandmasterState {
    fn default() -> Self {
        Self {
            level: 100,
            fader_position: 127,
            blackout: false,
        }
    }
}

impl GrandmasterState {
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_blackout(&self) -> bool {
        self.blackout
    }

    /// Tracks the fader even while blacked out.
    pub fn set_fader(&mut self, raw: u8) {
        self.fader_position = raw;
        self.level = scale(raw);
    }

    pub fn toggle_blackout(&mut self) -> bool {
        self.blackout = !self.blackout;
        self.blackout
    }

    /// Level the console should currently be at.
    pub fn output_level(&self) -> u8 {
        if self.blackout { 0 } else { self.level }
    }

    /// The LED is inverted: 127 is dark, so it follows `127 - fader`.
    pub fn led_velocity(&self) -> u8 {
        if self.blackout { 127 } else { 127 - self.fader_position }
    }
}

/// Relative encoder values per playback page, seeded at 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderBank {
    pages: Vec<[u8; ENCODERS_PER_PAGE]>,
}

impl Default for EncoderBank {
    fn default() -> Self {
        Self {
            pages: vec![[100; ENCODERS_PER_PAGE]; MAX_PAGE as usize],
        }
    }
}

impl EncoderBank {
    #[cfg(test)]
    pub fn get(&self, page: u8, index: usize) -> u8 {
        self.pages[(page - 1) as usize][index]
    }

    pub fn apply(&mut self, page: u8, index: usize, delta: i32) -> u8 {
        let value = &mut self.pages[(page - 1) as usize][index];
        *value = (*value as i32 + delta).clamp(0, 100) as u8;
        *value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_clamp() {
        let mut pages = PageState::default();
        for _ in 0..10 {
            pages.step(PageBank::Matrix, PageStep::Up);
        }
        assert_eq!(pages.matrix(), MAX_PAGE);
        assert_eq!(pages.playback(), 1);

        for _ in 0..10 {
            pages.step(PageBank::Matrix, PageStep::Down);
        }
        assert_eq!(pages.matrix(), 1);
    }

    #[test]
    fn test_pages_move_by_one() {
        let mut pages = PageState::default();
        assert_eq!(pages.step(PageBank::Playback, PageStep::Up), 2);
        assert_eq!(pages.step(PageBank::Playback, PageStep::Up), 3);
        assert_eq!(pages.step(PageBank::Playback, PageStep::Down), 2);
        assert_eq!(pages.matrix(), 1);
    }

    #[test]
    fn test_blackout_preserves_level() {
        let mut grandmaster = GrandmasterState::default();
        grandmaster.set_fader(71);
        let level = grandmaster.level();
        let velocity = grandmaster.led_velocity();

        assert!(grandmaster.toggle_blackout());
        assert_eq!(grandmaster.output_level(), 0);
        assert_eq!(grandmaster.led_velocity(), 127);

        assert!(!grandmaster.toggle_blackout());
        assert_eq!(grandmaster.output_level(), level);
        assert_eq!(grandmaster.led_velocity(), velocity);
    }

    #[test]
    fn test_fader_moves_during_blackout_are_kept() {
        let mut grandmaster = GrandmasterState::default();
        grandmaster.toggle_blackout();
        grandmaster.set_fader(64);
        assert_eq!(grandmaster.output_level(), 0);

        grandmaster.toggle_blackout();
        assert_eq!(grandmaster.output_level(), 51);
        assert_eq!(grandmaster.led_velocity(), 63);
    }

    #[test]
    fn test_encoders_converge_to_bounds() {
        let mut bank = EncoderBank::default();
        assert_eq!(bank.get(1, 0), 100);

        for _ in 0..150 {
            bank.apply(1, 0, -1);
        }
        assert_eq!(bank.get(1, 0), 0);
        assert_eq!(bank.apply(1, 0, -1), 0);

        for _ in 0..150 {
            bank.apply(1, 0, 1);
        }
        assert_eq!(bank.get(1, 0), 100);
        assert_eq!(bank.apply(1, 0, 1), 100);
    }

    #[test]
    fn test_encoders_are_page_scoped() {
        let mut bank = EncoderBank::default();
        bank.apply(2, 3, -1);
        assert_eq!(bank.get(2, 3), 99);
        assert_eq!(bank.get(1, 3), 100);
        assert_eq!(bank.get(MAX_PAGE, 7), 100);
    }
}
