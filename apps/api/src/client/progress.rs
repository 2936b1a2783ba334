/// Upload progress as a whole percentage, rounded half away from zero.
///
/// An unknown (zero) total reports 0.
pub fn percent(bytes_sent: u64, total_bytes: u64) -> u8 {
    if total_bytes == 0 {
        return 0;
    }
    let ratio = bytes_sent as f64 / total_bytes as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
