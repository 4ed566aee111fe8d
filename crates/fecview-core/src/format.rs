//! Currency formatting for dollar amounts and averages.
//!
//! Output mirrors a browser's default locale formatting of a number behind a
//! `$`: thousands separators, up to two fraction digits, trailing zeros
//! dropped.
//!
//! - `1500.0` → `$1,500`
//! - `1234.5` → `$1,234.5`
//! - `33.333` → `$33.33`
//! - `-1200.0` → `-$1,200`

/// Format a dollar amount for display.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    // Work in whole cents so rounding happens exactly once.
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut out = String::new();
    if amount < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(whole));

    if frac > 0 {
        let digits = format!("{frac:02}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Format a plain count with thousands separators.
pub fn format_count(n: u64) -> String {
    group_thousands(n)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
