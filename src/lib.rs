//! Filesystem capacity statistics for a mount point, in the spirit of `df`.
//!
//! ```no_run
//! use diskfree::{query, ByteScale};
//!
//! let snap = query("/")?;
//! println!("{:.1} GB free, {}% used", snap.avail(ByteScale::Gigabyte), snap.percent_used());
//! # Ok::<(), diskfree::Error>(())
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod util;

pub use collectors::statfs::{query, query_with, BlockCounts, StatSource, Statvfs};
pub use error::{Error, Result};
pub use models::scale::{ByteScale, GB, KB, MB, PB, TB};
pub use models::snapshot::FilesystemSnapshot;
