//! Display helpers shared by the page DTOs: money, avatar and tag colours.

use crate::domain::types::DealValue;

/// Palette cycled through by [`avatar_color`].
pub const AVATAR_COLORS: [&str; 8] = [
    "#6366f1", "#3b82f6", "#8b5cf6", "#10b981", "#f59e0b", "#ec4899", "#06b6d4", "#ef4444",
];

/// Colour for tags without a dedicated mapping.
pub const DEFAULT_TAG_COLOR: &str = "#64748b";

/// Formats a deal value as whole pounds with thousands separators, e.g. `£48,000`.
pub fn format_currency(value: DealValue) -> String {
    // `f64::round` rounds half away from zero.
    let digits = format!("{:.0}", value.get().round());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("£{grouped}")
}

/// Deterministically picks an avatar colour for `seed`.
///
/// Runs the `h = (h << 5) - h + unit` string hash over the first UTF-16 unit
/// of every character. Only the shift truncates to 32 bits; the running sum is
/// kept wide, and the palette is indexed by `|h| % 8`.
pub fn avatar_color(seed: &str) -> &'static str {
    let mut buf = [0u16; 2];
    let hash = seed.chars().fold(0i64, |h, c| {
        let unit = i64::from(c.encode_utf16(&mut buf)[0]);
        let shifted = i64::from((h as i32).wrapping_shl(5));
        shifted - h + unit
    });
    AVATAR_COLORS[(hash.unsigned_abs() % AVATAR_COLORS.len() as u64) as usize]
}

/// Badge colour for a lead tag.
pub fn tag_color(tag: &str) -> &'static str {
    match tag {
        "Hot" => "#ef4444",
        "Enterprise" => "#6366f1",
        "Priority" => "#f59e0b",
        "SMB" => "#10b981",
        "Mid-Market" => "#3b82f6",
        "EU" => "#8b5cf6",
        "Tech" => "#06b6d4",
        "AI" => "#ec4899",
        _ => DEFAULT_TAG_COLOR,
    }
}
