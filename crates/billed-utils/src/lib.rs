//! Utility functions and helpers

use std::sync::atomic::{AtomicU64, Ordering};

/// Escape text for safe interpolation into HTML fragments and attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format an amount the way the cards show it: no trailing zeros, euro suffix
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0} €", amount)
    } else {
        let fixed = format!("{:.2}", amount);
        format!("{} €", fixed.trim_end_matches('0').trim_end_matches('.'))
    }
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a unique 20 character alphanumeric ID
pub fn generate_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix64 over time + counter
    let mut state = now ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut id = String::with_capacity(20);
    while id.len() < 20 {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        id.push(ID_ALPHABET[(z % ID_ALPHABET.len() as u64) as usize] as char);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(348.0), "348 €");
        assert_eq!(format_amount(12.5), "12.5 €");
        assert_eq!(format_amount(0.25), "0.25 €");
        assert_eq!(format_amount(-40.0), "-40 €");
        assert_eq!(format_amount(1e20), "100000000000000000000 €");
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_eq!(a.len(), 20);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
