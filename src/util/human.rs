use crate::models::scale::ByteScale;
use crate::models::snapshot::FilesystemSnapshot;

/// Format a value already expressed in `scale`: "12.5 GB"
pub fn fmt_scaled(value: f64, scale: ByteScale) -> String {
    match scale {
        ByteScale::Byte => format!("{:.0} {}", value, scale.suffix()),
        _               => format!("{:.1} {}", value, scale.suffix()),
    }
}

/// Format a percentage: "84%"
pub fn fmt_pct(pct: i64) -> String {
    format!("{}%", pct)
}

/// One table row: mount, total, used, avail, use%.
pub fn fmt_row(mount: &str, snap: &FilesystemSnapshot, scale: ByteScale) -> String {
    format!(
        "{:<24} {:>12} {:>12} {:>12} {:>5}",
        mount,
        fmt_scaled(snap.total(scale), scale),
        fmt_scaled(snap.used(scale),  scale),
        fmt_scaled(snap.avail(scale), scale),
        fmt_pct(snap.percent_used()),
    )
}

pub fn fmt_header() -> String {
    format!("{:<24} {:>12} {:>12} {:>12} {:>5}", "Mount", "Total", "Used", "Avail", "Use%")
}
