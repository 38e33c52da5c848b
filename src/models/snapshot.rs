use crate::models::scale::ByteScale;
use serde::Serialize;

/// Capacity of one filesystem at the instant it was queried.
///
/// Byte values are kept as `f64` so they can be scaled to GB/TB/PB without
/// integer overflow. `avail_bytes == total_bytes - used_bytes` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilesystemSnapshot {
    total_bytes:  f64,
    used_bytes:   f64,
    avail_bytes:  f64,
    percent_used: i64,
}

impl FilesystemSnapshot {
    /// Build a snapshot from raw block counts as reported by the OS.
    pub fn from_blocks(total_blocks: u64, free_blocks: u64, block_size: u64) -> Self {
        let used_blocks = total_blocks.saturating_sub(free_blocks);
        let bsize       = block_size as f64;

        let total_bytes = total_blocks as f64 * bsize;
        let used_bytes  = used_blocks  as f64 * bsize;
        Self::from_bytes(total_bytes, used_bytes)
    }

    /// Build a snapshot from byte totals. `percent_used` is the ceiling of
    /// used/total as a percentage, or 0 for a zero-capacity filesystem.
    pub fn from_bytes(total_bytes: f64, used_bytes: f64) -> Self {
        let avail_bytes  = total_bytes - used_bytes;
        let percent_used = if total_bytes == 0.0 {
            0
        } else {
            (used_bytes * 100.0 / total_bytes).ceil() as i64
        };

        Self { total_bytes, used_bytes, avail_bytes, percent_used }
    }

    pub fn total(&self, scale: ByteScale) -> f64 {
        self.total_bytes / scale.bytes() as f64
    }

    pub fn used(&self, scale: ByteScale) -> f64 {
        self.used_bytes / scale.bytes() as f64
    }

    pub fn avail(&self, scale: ByteScale) -> f64 {
        self.avail_bytes / scale.bytes() as f64
    }

    pub fn percent_used(&self) -> i64 {
        self.percent_used
    }
}
