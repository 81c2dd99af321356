//! Physical layout of the control surface and the console addresses it maps to.
//!
//! The numbers here match the console show file; they are not free to change.

pub const MAX_PAGE: u8 = 5;
pub const ENCODERS_PER_PAGE: usize = 8;

pub const PLAYBACK_PAGE_INDICATOR: u8 = 10;
pub const MATRIX_PAGE_INDICATOR: u8 = 11;
pub const GRANDMASTER_LED: u8 = 114;

pub const GRANDMASTER_FADER: u8 = 9;
pub const PLAYBACK_FADER_BASE: u16 = 200;

pub const MATRIX_COLUMNS: u8 = 8;
pub const MATRIX_KEY_ANCHOR: u16 = 515;

pub const SELECT_ENCODER_BANK_OFFSET: u8 = 58;

pub const PLAYBACK_ENCODER_OFFSET: u8 = 85;
pub const PLAYBACK_ENCODER_BASE: u16 = 301;

pub const SESSION_WHEEL_OFFSET: u8 = 77;
pub const SESSION_WHEEL_X: [i32; 4] = [204, 577, 946, 1315];
pub const SESSION_WHEEL_Y: i32 = 995;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRoute {
    PlaybackFader,
    Grandmaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteRoute {
    MatrixKey,
    PlaybackKey { offset: u8, base_key: u16 },
    PlaybackPageUp,
    PlaybackPageDown,
    SelectEncoderBank,
    MatrixPageUp,
    MatrixPageDown,
    Blackout,
    SessionWheel,
    PlaybackEncoder,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteEntry<R> {
    pub first: u8,
    pub last: u8,
    pub route: R,
}

const fn entry<R>(first: u8, last: u8, route: R) -> RouteEntry<R> {
    RouteEntry { first, last, route }
}

/// Sorted by `first`, ranges disjoint.
pub const CONTROL_ROUTES: &[RouteEntry<ControlRoute>] = &[
    entry(0, 8, ControlRoute::PlaybackFader),
    entry(GRANDMASTER_FADER, GRANDMASTER_FADER, ControlRoute::Grandmaster),
];

/// Sorted by `first`, ranges disjoint.
pub const NOTE_ROUTES: &[RouteEntry<NoteRoute>] = &[
    entry(1, 32, NoteRoute::MatrixKey),
    entry(33, 40, NoteRoute::PlaybackKey { offset: 33, base_key: 191 }),
    entry(41, 48, NoteRoute::PlaybackKey { offset: 41, base_key: 201 }),
    entry(49, 56, NoteRoute::PlaybackKey { offset: 49, base_key: 101 }),
    entry(57, 57, NoteRoute::PlaybackPageUp),
    entry(58, 58, NoteRoute::PlaybackPageDown),
    entry(59, 64, NoteRoute::SelectEncoderBank),
    entry(65, 65, NoteRoute::MatrixPageUp),
    entry(66, 66, NoteRoute::MatrixPageDown),
    entry(67, 67, NoteRoute::Blackout),
    entry(68, 75, NoteRoute::PlaybackKey { offset: 68, base_key: 301 }),
    entry(78, 85, NoteRoute::SessionWheel),
    entry(86, 101, NoteRoute::PlaybackEncoder),
];

pub fn resolve<R: Copy>(table: &[RouteEntry<R>], id: u8) -> Option<R> {
    table
        .binary_search_by(|entry| {
            if entry.last < id {
                std::cmp::Ordering::Less
            } else if entry.first > id {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .ok()
        .map(|index| table[index].route)
}

/// Grid note 1..=32 (8 wide, 4 rows) to console key `515 - row * 100 + column`.
pub fn matrix_key(note: u8) -> u16 {
    let row = u16::from(note.div_ceil(MATRIX_COLUMNS));
    let column = match note % MATRIX_COLUMNS {
        0 => MATRIX_COLUMNS,
        column => column,
    };
    MATRIX_KEY_ANCHOR - row * 100 + u16::from(column)
}

pub fn playback_key(note: u8, offset: u8, base_key: u16) -> u16 {
    base_key + (note - offset) as u16
}

/// Every encoder reports two adjacent notes, one per direction.
pub fn playback_encoder_index(note: u8) -> usize {
    ((note - PLAYBACK_ENCODER_OFFSET).div_ceil(2) - 1) as usize
}

/// 1-based number of the encoder driving the remote session view.
pub fn session_wheel_encoder(note: u8) -> usize {
    (note - SESSION_WHEEL_OFFSET).div_ceil(2) as usize
}

/// Even notes turn clockwise.
pub fn rotation_delta(note: u8) -> i32 {
    if note % 2 == 0 { 1 } else { -1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_sorted_and_disjoint<R>(table: &[RouteEntry<R>]) {
        for entry in table {
            assert!(entry.first <= entry.last);
        }
        for pair in table.windows(2) {
            assert!(pair[0].last < pair[1].first, "{}..={} overlaps {}", pair[0].first, pair[0].last, pair[1].first);
        }
    }

    #[test]
    fn test_route_tables_are_sorted_and_disjoint() {
        assert_sorted_and_disjoint(CONTROL_ROUTES);
        assert_sorted_and_disjoint(NOTE_ROUTES);
    }

    #[test]
    fn test_resolve_boundaries() {
        assert_eq!(resolve(CONTROL_ROUTES, 0), Some(ControlRoute::PlaybackFader));
        assert_eq!(resolve(CONTROL_ROUTES, 1), Some(ControlRoute::PlaybackFader));
        assert_eq!(resolve(CONTROL_ROUTES, 8), Some(ControlRoute::PlaybackFader));
        assert_eq!(resolve(CONTROL_ROUTES, 9), Some(ControlRoute::Grandmaster));
        assert_eq!(resolve(CONTROL_ROUTES, 10), None);

        assert_eq!(resolve(NOTE_ROUTES, 0), None);
        assert_eq!(resolve(NOTE_ROUTES, 32), Some(NoteRoute::MatrixKey));
        assert_eq!(resolve(NOTE_ROUTES, 33), Some(NoteRoute::PlaybackKey { offset: 33, base_key: 191 }));
        assert_eq!(resolve(NOTE_ROUTES, 67), Some(NoteRoute::Blackout));
        assert_eq!(resolve(NOTE_ROUTES, 76), None);
        assert_eq!(resolve(NOTE_ROUTES, 77), None);
        assert_eq!(resolve(NOTE_ROUTES, 85), Some(NoteRoute::SessionWheel));
        assert_eq!(resolve(NOTE_ROUTES, 86), Some(NoteRoute::PlaybackEncoder));
        assert_eq!(resolve(NOTE_ROUTES, 101), Some(NoteRoute::PlaybackEncoder));
        assert_eq!(resolve(NOTE_ROUTES, 102), None);
    }

    #[test]
    fn test_matrix_key_corners() {
        assert_eq!(matrix_key(1), 416);
        assert_eq!(matrix_key(8), 423);
        assert_eq!(matrix_key(9), 316);
        assert_eq!(matrix_key(16), 323);
        assert_eq!(matrix_key(25), 116);
        assert_eq!(matrix_key(32), 123);
    }

    #[test]
    fn test_matrix_key_matches_formula_and_is_unique() {
        let mut seen = HashSet::new();
        for note in 1..=32u8 {
            let row = (note as i32 + 7) / 8;
            let column = if note % 8 == 0 { 8 } else { (note % 8) as i32 };
            let expected = 515 - row * 100 + column;
            assert_eq!(matrix_key(note) as i32, expected, "note {}", note);
            assert!(seen.insert(matrix_key(note)), "duplicate key for note {}", note);
        }
    }

    #[test]
    fn test_playback_keys() {
        assert_eq!(playback_key(33, 33, 191), 191);
        assert_eq!(playback_key(40, 33, 191), 198);
        assert_eq!(playback_key(49, 49, 101), 101);
        assert_eq!(playback_key(75, 68, 301), 308);
    }

    #[test]
    fn test_encoder_note_pairs() {
        assert_eq!(playback_encoder_index(86), 0);
        assert_eq!(playback_encoder_index(87), 0);
        assert_eq!(playback_encoder_index(88), 1);
        assert_eq!(playback_encoder_index(100), 7);
        assert_eq!(playback_encoder_index(101), 7);

        assert_eq!(session_wheel_encoder(78), 1);
        assert_eq!(session_wheel_encoder(79), 1);
        assert_eq!(session_wheel_encoder(80), 2);
        assert_eq!(session_wheel_encoder(85), 4);

        assert_eq!(rotation_delta(86), 1);
        assert_eq!(rotation_delta(87), -1);
    }
}
