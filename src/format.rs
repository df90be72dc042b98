/// Format an amount as Brazilian Real text, e.g. `R$ 1.234,56`.
///
/// The separator after `R$` is a non-breaking space (U+00A0), as in the
/// standard pt-BR currency formatting.
pub fn format_brl(value: f64) -> String {
    // Ties round away from zero and the sign survives rounding to zero.
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let whole = group_thousands(&(cents / 100).to_string(), '.');
    format!("{sign}R$\u{a0}{whole},{:02}", cents % 100)
}

/// Energy amount with its unit, printed the way the dashboard cards show it.
pub fn format_kwh(value: f64) -> String {
    format!("{value} kWh")
}

/// Human-readable size of a pending upload.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_groups_and_uses_comma_decimals() {
        assert_eq!(format_brl(0.0), "R$\u{a0}0,00");
        assert_eq!(format_brl(47.75), "R$\u{a0}47,75");
        assert_eq!(format_brl(1234.5), "R$\u{a0}1.234,50");
        assert_eq!(format_brl(1_234_567.891), "R$\u{a0}1.234.567,89");
    }

    #[test]
    fn brl_negative_amounts() {
        assert_eq!(format_brl(-222.22), "-R$\u{a0}222,22");
        assert_eq!(format_brl(-0.001), "-R$\u{a0}0,00");
        assert_eq!(format_brl(-0.0), "-R$\u{a0}0,00");
    }

    #[test]
    fn brl_ties_round_away_from_zero() {
        assert_eq!(format_brl(10.125), "R$\u{a0}10,13");
        assert_eq!(format_brl(0.125), "R$\u{a0}0,13");
        assert_eq!(format_brl(-0.125), "-R$\u{a0}0,13");
    }

    #[test]
    fn kwh_drops_trailing_zero_fraction() {
        assert_eq!(format_kwh(1200.0), "1200 kWh");
        assert_eq!(format_kwh(12.5), "12.5 kWh");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1_048_576), "3.0 MB");
    }
}
