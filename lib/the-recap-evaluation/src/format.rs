/// Compact human-readable rendering of a stat total: `950`, `1.8k`, `27k`,
/// `1.5M`. A trailing `.0` is always dropped.
pub fn format_number(n: u64) -> String {
    if n < 1_000 {
        return n.to_string();
    }
    if n < 1_000_000 {
        let thousands = n as f64 / 1_000.0;
        let rounded = if n < 10_000 {
            thousands
        } else {
            (thousands * 10.0 + 0.5).floor() / 10.0
        };
        return with_suffix(rounded, 'k');
    }
    with_suffix(n as f64 / 1_000_000.0, 'M')
}

fn with_suffix(value: f64, suffix: char) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}{suffix}")
    } else {
        format!("{value:.1}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers_unchanged() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_number(1000), "1k");
        assert_eq!(format_number(1800), "1.8k");
        assert_eq!(format_number(9999), "10.0k");
        assert_eq!(format_number(10_000), "10k");
        assert_eq!(format_number(27_022), "27k");
        assert_eq!(format_number(27_460), "27.5k");
        assert_eq!(format_number(999_960), "1000k");
    }

    #[test]
    fn millions() {
        assert_eq!(format_number(1_000_000), "1M");
        assert_eq!(format_number(1_500_000), "1.5M");
    }
}
