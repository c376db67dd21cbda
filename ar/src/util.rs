use std::time::SystemTime;

/// Format a modification time as RFC 3339, or `-` if it could not be decoded.
pub fn format_time(time: Option<SystemTime>) -> String {
    time.map(|x| {
        let datetime: chrono::DateTime<chrono::Utc> = x.into();
        datetime.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    })
    .unwrap_or_else(|| "-".into())
}

/// Format the permission bits of a mode as `rwxr-xr-x`.
pub fn format_mode(mode: Option<u32>) -> String {
    mode.map(|mode| {
        let acl = (mode & 0o777) as u16;
        let mut s = String::with_capacity(9);

        macro_rules! add {
            ($bit:expr, $char:expr) => {
                if (acl & $bit) > 0 {
                    s.push($char);
                } else {
                    s.push('-');
                }
            };
        }

        add!(0b1_0000_0000, 'r');
        add!(0b0_1000_0000, 'w');
        add!(0b0_0100_0000, 'x');
        add!(0b0_0010_0000, 'r');
        add!(0b0_0001_0000, 'w');
        add!(0b0_0000_1000, 'x');
        add!(0b0_0000_0100, 'r');
        add!(0b0_0000_0010, 'w');
        add!(0b0_0000_0001, 'x');

        s
    })
    .unwrap_or_else(|| "-".into())
}

/// Format file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    use humansize::{BINARY, FormatSize};
    bytes.format_size(BINARY)
}

/// Whether a member name can be written below the output directory as-is.
pub fn is_safe_member_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}
