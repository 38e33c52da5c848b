use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const KB: u64 = 1024;
pub const MB: u64 = KB * KB;
pub const GB: u64 = MB * KB;
pub const TB: u64 = GB * KB;
pub const PB: u64 = TB * KB;

/// Unit of measure for scaled snapshot values. Each step is a power of 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ByteScale {
    #[value(alias = "b")]
    Byte,
    #[value(alias = "k", alias = "kb")]
    Kilobyte,
    #[value(alias = "m", alias = "mb")]
    Megabyte,
    #[value(alias = "g", alias = "gb")]
    Gigabyte,
    #[value(alias = "t", alias = "tb")]
    Terabyte,
    #[value(alias = "p", alias = "pb")]
    Petabyte,
}

impl ByteScale {
    pub const ALL: [ByteScale; 6] = [
        ByteScale::Byte,
        ByteScale::Kilobyte,
        ByteScale::Megabyte,
        ByteScale::Gigabyte,
        ByteScale::Terabyte,
        ByteScale::Petabyte,
    ];

    /// Number of bytes in one unit of this scale.
    pub fn bytes(self) -> u64 {
        match self {
            ByteScale::Byte     => 1,
            ByteScale::Kilobyte => KB,
            ByteScale::Megabyte => MB,
            ByteScale::Gigabyte => GB,
            ByteScale::Terabyte => TB,
            ByteScale::Petabyte => PB,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ByteScale::Byte     => "B",
            ByteScale::Kilobyte => "KB",
            ByteScale::Megabyte => "MB",
            ByteScale::Gigabyte => "GB",
            ByteScale::Terabyte => "TB",
            ByteScale::Petabyte => "PB",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ByteScale::Byte     => "byte",
            ByteScale::Kilobyte => "kilobyte",
            ByteScale::Megabyte => "megabyte",
            ByteScale::Gigabyte => "gigabyte",
            ByteScale::Terabyte => "terabyte",
            ByteScale::Petabyte => "petabyte",
        }
    }
}

impl Default for ByteScale {
    fn default() -> Self { ByteScale::Gigabyte }
}

impl fmt::Display for ByteScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown byte scale: {0:?}")]
pub struct ParseScaleError(String);

impl FromStr for ByteScale {
    type Err = ParseScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "byte" | "bytes"          => Ok(ByteScale::Byte),
            "k" | "kb" | "kib" | "kilobyte" => Ok(ByteScale::Kilobyte),
            "m" | "mb" | "mib" | "megabyte" => Ok(ByteScale::Megabyte),
            "g" | "gb" | "gib" | "gigabyte" => Ok(ByteScale::Gigabyte),
            "t" | "tb" | "tib" | "terabyte" => Ok(ByteScale::Terabyte),
            "p" | "pb" | "pib" | "petabyte" => Ok(ByteScale::Petabyte),
            _ => Err(ParseScaleError(s.to_string())),
        }
    }
}
