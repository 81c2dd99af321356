//! Raw 7-bit control values to console percent.

const SCALE_TABLE: [u8; 128] = build_table();

const fn build_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut raw = 0;
    while raw < 128 {
        // floor(raw * 0.8), saturating at 100 from raw 125 on
        let scaled = raw * 4 / 5;
        table[raw] = if scaled > 100 { 100 } else { scaled as u8 };
        raw += 1;
    }
    table
}

pub fn scale(raw: u8) -> u8 {
    SCALE_TABLE[(raw & 0x7F) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic() {
        for raw in 1..=127u8 {
            assert!(scale(raw) >= scale(raw - 1), "scale({}) dropped", raw);
        }
    }

    #[test]
    fn test_saturation() {
        assert_eq!(scale(124), 99);
        assert_eq!(scale(125), 100);
        assert_eq!(scale(126), 100);
        assert_eq!(scale(127), 100);
    }

    #[test]
    fn test_floor_values() {
        assert_eq!(scale(0), 0);
        assert_eq!(scale(1), 0);
        assert_eq!(scale(2), 1);
        assert_eq!(scale(64), 51);
        assert_eq!(scale(100), 80);
    }
}
