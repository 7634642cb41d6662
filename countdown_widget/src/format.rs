/// Render a remaining duration as `HH:MM:SS`.
///
/// Every field is at least two digits wide. Hours are not capped, so 100
/// hours renders as `100:00:00`.
#[must_use]
pub fn format_remaining(remaining_ms: u64) -> String {
    let seconds = remaining_ms / 1000;
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let seconds = seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
