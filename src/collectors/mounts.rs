use anyhow::Result;

/// Filesystems that never hold user data.
const SKIP_FS: &[&str] = &[
    "proc", "sysfs", "devpts", "tmpfs", "devtmpfs", "cgroup", "cgroup2",
    "pstore", "efivarfs", "securityfs", "debugfs", "tracefs", "bpf",
    "hugetlbfs", "mqueue", "fusectl", "configfs", "binfmt_misc",
    "overlay", "nsfs", "rpc_pipefs", "autofs", "squashfs",
];

const SKIP_MOUNT_PREFIX: &[&str] = &[
    "/proc", "/sys", "/dev", "/run/user", "/snap",
];

/// One line of the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device:  String,
    pub mount:   String,
    pub fs_type: String,
}

impl MountEntry {
    fn is_real(&self) -> bool {
        if SKIP_FS.contains(&self.fs_type.as_str()) { return false; }
        if SKIP_MOUNT_PREFIX.iter().any(|p| self.mount.starts_with(p)) { return false; }
        // Skip loop-mounted snaps
        !self.device.starts_with("/dev/loop")
    }
}

/// Mount points of real filesystems from /proc/mounts, sorted.
pub fn read_mount_points() -> Result<Vec<String>> {
    let content = std::fs::read_to_string("/proc/mounts")?;
    Ok(mount_points(&parse_mounts(&content)))
}

pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    let mut v = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 { continue; }
        v.push(MountEntry {
            device:  fields[0].to_string(),
            mount:   unescape(fields[1]),
            fs_type: fields[2].to_string(),
        });
    }
    v
}

/// Real mount points only, sorted and without duplicates.
pub fn mount_points(entries: &[MountEntry]) -> Vec<String> {
    let mut out: Vec<String> = entries
        .iter()
        .filter(|e| {
            let keep = e.is_real();
            if !keep {
                tracing::trace!(mount = %e.mount, fs_type = %e.fs_type, "skipping mount");
            }
            keep
        })
        .map(|e| e.mount.clone())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Decode the octal escapes the kernel uses for whitespace in paths ("\040").
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let oct = std::str::from_utf8(&bytes[i + 1..i + 4]).ok();
            if let Some(b) = oct.and_then(|o| u8::from_str_radix(o, 8).ok()) {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
