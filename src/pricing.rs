//! Conversion between decorated price strings and whole-koruna amounts.
//!
//! Catalog prices arrive as display strings (`"159 Kč"`, `"+20 Kč"`). Every
//! calculation goes through [`extract_price`]; nothing else reads digits out
//! of a price string.

/// Currency suffix used when rendering amounts.
pub const CURRENCY: &str = "Kč";

/// Returns the first maximal run of ASCII digits in `price` as an amount.
///
/// Strings without digits (including the empty string) are worth 0. Only the
/// first run counts, so `"2 for 99 Kč"` is 2. A run too long for `u64`
/// saturates at `u64::MAX`.
pub fn extract_price(price: &str) -> u64 {
    price
        .bytes()
        .skip_while(|b| !b.is_ascii_digit())
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |amount, digit| {
            amount
                .saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

/// Renders an amount the way the menu shows it, e.g. `194 Kč`.
pub fn format_price(amount: u64) -> String {
    format!("{} {}", amount, CURRENCY)
}
