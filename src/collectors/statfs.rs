use crate::error::{Error, Result};
use crate::models::snapshot::FilesystemSnapshot;
use std::io;
use std::path::Path;

/// Raw capacity figures for one filesystem, in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCounts {
    pub total_blocks: u64,
    pub free_blocks:  u64,
    /// Size in bytes of the unit `total_blocks` and `free_blocks` are counted in.
    pub block_size:   u64,
}

/// The one OS call the query depends on. Platforms without statvfs plug in
/// their own equivalent here.
pub trait StatSource {
    fn block_counts(&self, path: &Path) -> io::Result<BlockCounts>;
}

/// `statvfs(3)` backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Statvfs;

#[cfg(unix)]
impl StatSource for Statvfs {
    fn block_counts(&self, path: &Path) -> io::Result<BlockCounts> {
        use nix::sys::statvfs::statvfs;
        let stat = statvfs(path)?;

        Ok(BlockCounts {
            total_blocks: stat.blocks()        as u64,
            free_blocks:  stat.blocks_free()   as u64,
            block_size:   stat.fragment_size() as u64,
        })
    }
}

#[cfg(not(unix))]
impl StatSource for Statvfs {
    fn block_counts(&self, _path: &Path) -> io::Result<BlockCounts> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "statvfs is not available on this platform"))
    }
}

/// Query capacity statistics for the filesystem mounted at `mount_point`.
pub fn query(mount_point: impl AsRef<Path>) -> Result<FilesystemSnapshot> {
    query_with(&Statvfs, mount_point)
}

/// Same as [`query`], reading block counts from `source`.
pub fn query_with<S>(source: &S, mount_point: impl AsRef<Path>) -> Result<FilesystemSnapshot>
where
    S: StatSource + ?Sized,
{
    let path = mount_point.as_ref();
    let counts = source.block_counts(path).map_err(|source| Error::Query {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        blocks = counts.total_blocks,
        free = counts.free_blocks,
        bsize = counts.block_size,
        "statvfs"
    );

    Ok(FilesystemSnapshot::from_blocks(
        counts.total_blocks,
        counts.free_blocks,
        counts.block_size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scale::ByteScale;

    struct Fixed(BlockCounts);

    impl StatSource for Fixed {
        fn block_counts(&self, _path: &Path) -> io::Result<BlockCounts> {
            Ok(self.0)
        }
    }

    struct Failing(i32);

    impl StatSource for Failing {
        fn block_counts(&self, _path: &Path) -> io::Result<BlockCounts> {
            Err(io::Error::from_raw_os_error(self.0))
        }
    }

    #[test]
    fn snapshot_comes_from_source_counts() {
        let src = Fixed(BlockCounts { total_blocks: 1_000_000, free_blocks: 250_000, block_size: 4096 });
        let s = query_with(&src, "/mnt/data").unwrap();
        assert_eq!(s.total(ByteScale::Byte), 4_096_000_000.0);
        assert_eq!(s.used(ByteScale::Byte),  3_072_000_000.0);
        assert_eq!(s.avail(ByteScale::Byte), 1_024_000_000.0);
        assert_eq!(s.percent_used(), 75);
    }

    #[test]
    fn os_error_passes_through_with_path() {
        let err = query_with(&Failing(13), "/root/secret").unwrap_err();
        assert_eq!(err.raw_os_error(), Some(13));
        assert_eq!(err.path(), Path::new("/root/secret"));
        assert!(err.to_string().contains("/root/secret"));
    }

    #[test]
    fn works_through_trait_object() {
        let src: Box<dyn StatSource> =
            Box::new(Fixed(BlockCounts { total_blocks: 8, free_blocks: 2, block_size: 1024 }));
        let s = query_with(src.as_ref(), "/").unwrap();
        assert_eq!(s.used(ByteScale::Kilobyte), 6.0);
        assert_eq!(s.percent_used(), 75);
    }

    #[test]
    fn each_query_is_independent() {
        let a = query_with(&Fixed(BlockCounts { total_blocks: 10, free_blocks: 5, block_size: 1 }), "/a").unwrap();
        let b = query_with(&Fixed(BlockCounts { total_blocks: 10, free_blocks: 1, block_size: 1 }), "/a").unwrap();
        assert_eq!(a.percent_used(), 50);
        assert_eq!(b.percent_used(), 90);
    }
}
