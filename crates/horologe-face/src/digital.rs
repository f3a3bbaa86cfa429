use chrono::NaiveTime;

/// Twelve-hour readout with zero-padded fields, e.g. `"01:05:09 PM"`.
pub fn format_digital(time: NaiveTime) -> String {
    time.format("%I:%M:%S %p").to_string()
}
