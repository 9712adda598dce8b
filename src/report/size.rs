//! Human-Readable Sizes

/// Format a byte count with base-1024 units and one decimal place.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_is_exact() {
        assert_eq!(format_size(0), "0 B");
    }

    #[test]
    fn scales_through_units() {
        assert_eq!(format_size(512), "512.0 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    proptest! {
        #[test]
        fn always_ends_with_a_known_unit(bytes in any::<u64>()) {
            let text = format_size(bytes);
            prop_assert!(
                ["B", "KB", "MB", "GB", "TB"]
                    .iter()
                    .any(|unit| text.ends_with(unit))
            );
        }
    }
}
