use crate::constants::SIZE_UNITS;

const STEP: u64 = 1024;

/// Human-readable size: base 1024, two decimals at most, trailing zeros dropped.
///
/// `0` is special-cased to `"0 Bytes"`. Sizes beyond the last unit stay in TB.
pub fn format_file_size(size: u64) -> String {
    if size == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0usize;
    let mut divisor = 1u64;
    while unit + 1 < SIZE_UNITS.len() && size / divisor >= STEP {
        divisor *= STEP;
        unit += 1;
    }

    let scaled = size as f64 / divisor as f64;
    format!("{} {}", trim_decimals(&format!("{scaled:.2}")), SIZE_UNITS[unit])
}

fn trim_decimals(fixed: &str) -> &str {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_special() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn bytes_below_one_kilobyte() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
        assert_eq!(format_file_size(1024u64.pow(4)), "1 TB");
    }

    #[test]
    fn two_decimals_with_trailing_zeros_dropped() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1100), "1.07 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
    }

    #[test]
    fn beyond_terabytes_stays_in_tb() {
        assert_eq!(format_file_size(2048 * 1024u64.pow(4)), "2048 TB");
    }

    #[test]
    fn scaled_value_is_at_least_one() {
        for size in [1u64, 999, 1024, 1025, 1_048_575, 1_048_576, 7_340_032] {
            let formatted = format_file_size(size);
            let value: f64 = formatted.split(' ').next().unwrap().parse().unwrap();
            assert!(value >= 1.0, "{size} -> {formatted}");
        }
    }
}
