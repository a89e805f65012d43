use chrono::{NaiveTime, Timelike};

/// ---------------------------------------------------------------------------
/// Clock-Time Normalization
/// ---------------------------------------------------------------------------

/// Accepted input shapes, tried in order. Bare `7:30` is read as 24-hour.
const TIME_FORMATS: [&str; 3] = ["%H:%M", "%I:%M %p", "%I:%M%p"];

/// Parse a freeform clock time (`"7:30 am"`, `"18:00"`, `"9pm"`) into the
/// canonical 24-hour `HH:MM` form. Returns `None` when nothing parses.
pub fn normalize(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  let candidate = expand_bare_meridiem(trimmed);
  for format in TIME_FORMATS {
    if let Ok(time) = NaiveTime::parse_from_str(&candidate, format) {
      return Some(time.format("%H:%M").to_string());
    }
  }
  None
}

/// `NaiveTime` parsing requires a minute field, so hour-only literals such
/// as `9pm` and `7 am` gain one (`9:00 pm`) before the format loop.
fn expand_bare_meridiem(trimmed: &str) -> String {
  let lower = trimmed.to_lowercase();
  if let Some(hour) = lower.strip_suffix("am").or_else(|| lower.strip_suffix("pm")) {
    let hour = hour.trim_end();
    if !hour.is_empty() && hour.chars().all(|c| c.is_ascii_digit()) {
      return format!("{}:00 {}", hour, &lower[lower.len() - 2..]);
    }
  }
  trimmed.to_string()
}

/// Minutes since midnight for a canonical `HH:MM` string.
pub fn minutes_of_day(hhmm: &str) -> Option<u32> {
  let time = NaiveTime::parse_from_str(hhmm, "%H:%M").ok()?;
  Some(time.hour() * 60 + time.minute())
}

/// Inverse of [`minutes_of_day`], wrapping at midnight.
pub fn from_minutes(total: u32) -> String {
  format!("{:02}:{:02}", (total / 60) % 24, total % 60)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
