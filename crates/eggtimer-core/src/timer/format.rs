/// Render seconds as `m:ss`. Minutes are not padded and may exceed 59.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
