//! Rupee amounts spelled out in English words.

const UNITS: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Largest whole-rupee amount that can be spelled out, exclusive.
pub const WORDS_LIMIT: u64 = 100_000;

pub const TOO_LARGE: &str = "Amount too large";

const SUFFIX: &str = "Rupees Only";

/// Spell out the whole-rupee part of `amount`.
///
/// Paise are dropped, so `150.75` reads "One Hundred Fifty Rupees Only".
/// Amounts of one lakh and above are not spelled out.
pub fn to_words(amount: f64) -> String {
    let rupees = if amount.is_finite() && amount > 0.0 {
        amount.trunc() as u64
    } else {
        0
    };

    if rupees == 0 {
        return format!("Zero {SUFFIX}");
    }
    if rupees >= WORDS_LIMIT {
        return TOO_LARGE.to_string();
    }

    let mut words = Vec::new();
    push_words(rupees, &mut words);
    format!("{} {SUFFIX}", words.join(" ").trim())
}

fn push_words(n: u64, out: &mut Vec<&'static str>) {
    match n {
        0 => {}
        1..=19 => out.push(UNITS[n as usize]),
        20..=99 => {
            out.push(TENS[(n / 10) as usize]);
            push_words(n % 10, out);
        }
        100..=999 => {
            out.push(UNITS[(n / 100) as usize]);
            out.push("Hundred");
            push_words(n % 100, out);
        }
        _ => {
            push_words(n / 1000, out);
            out.push("Thousand");
            push_words(n % 1000, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert_eq!(to_words(0.0), "Zero Rupees Only");
        assert_eq!(to_words(0.75), "Zero Rupees Only");
    }

    #[test]
    fn teens_and_tens() {
        assert_eq!(to_words(1.0), "One Rupees Only");
        assert_eq!(to_words(19.0), "Nineteen Rupees Only");
        assert_eq!(to_words(20.0), "Twenty Rupees Only");
        assert_eq!(to_words(99.0), "Ninety Nine Rupees Only");
    }

    #[test]
    fn hundreds() {
        assert_eq!(to_words(105.0), "One Hundred Five Rupees Only");
        assert_eq!(to_words(100.0), "One Hundred Rupees Only");
        assert_eq!(to_words(999.0), "Nine Hundred Ninety Nine Rupees Only");
    }

    #[test]
    fn thousands() {
        assert_eq!(
            to_words(1234.0),
            "One Thousand Two Hundred Thirty Four Rupees Only"
        );
        assert_eq!(to_words(20_000.0), "Twenty Thousand Rupees Only");
        assert_eq!(
            to_words(99_999.0),
            "Ninety Nine Thousand Nine Hundred Ninety Nine Rupees Only"
        );
    }

    #[test]
    fn fraction_is_dropped() {
        assert_eq!(to_words(150.5), "One Hundred Fifty Rupees Only");
        assert_eq!(to_words(19.99), "Nineteen Rupees Only");
    }

    #[test]
    fn one_lakh_and_above_is_too_large() {
        assert_eq!(to_words(100_000.0), TOO_LARGE);
        assert_eq!(to_words(2_500_000.0), TOO_LARGE);
    }

    #[test]
    fn negative_and_nan_read_as_zero() {
        assert_eq!(to_words(-5.0), "Zero Rupees Only");
        assert_eq!(to_words(f64::NAN), "Zero Rupees Only");
    }

    #[test]
    fn never_contains_double_spaces() {
        for n in (1..WORDS_LIMIT).step_by(97) {
            let words = to_words(n as f64);
            assert!(!words.contains("  "), "{n}: {words:?}");
        }
    }
}
