use chrono::NaiveDateTime;

/// Taskbar time, honoring the 12/24-hour setting.
pub fn format_time(now: &NaiveDateTime, twenty_four_hour: bool) -> String {
    if twenty_four_hour {
        now.format("%H:%M").to_string()
    } else {
        now.format("%-I:%M %p").to_string()
    }
}

/// Taskbar date: short weekday, short month, day.
pub fn format_date(now: &NaiveDateTime) -> String {
    now.format("%a %b %-d").to_string()
}
