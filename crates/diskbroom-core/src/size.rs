//! Size formatting utilities - human-readable byte counts.
//!
//! All sizes are `u64` bytes. Floating point is only used at the
//! display-formatting boundary.

/// Unit prefixes for successive powers of 1024, starting at 1024^1.
const UNIT_PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

const MB: f64 = 1024.0 * 1024.0;

/// Format a byte count into a human-readable string.
///
/// Values below 1024 are printed as whole bytes (`"512 B"`). Larger values
/// use the largest power of 1024 not exceeding the value, rendered with two
/// decimals (`"1.50 KB"`, `"1.00 GB"`).
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    // floor(log1024(bytes)) == floor(log2(bytes)) / 10, exact for every u64.
    let exp = (u64::BITS - 1 - bytes.leading_zeros()) / 10;
    let prefix = UNIT_PREFIXES[exp as usize - 1];
    let value = bytes as f64 / 1024f64.powi(exp as i32);

    format!("{value:.2} {prefix}B")
}

/// Convert a byte count to megabytes.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / MB
}

/// Format a byte count as megabytes with two decimals (`"15.40 MB"`).
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes_to_mb(bytes))
}
