//! Queries against the live OS.

use diskfree::{query, ByteScale, Error};
use std::io::ErrorKind;

#[cfg(unix)]
#[test]
fn root_filesystem_has_sane_values() {
    let snap = query("/").expect("statvfs on / should succeed");
    let total = snap.total(ByteScale::Byte);
    let used  = snap.used(ByteScale::Byte);

    assert!(total > 0.0);
    assert!(used >= 0.0 && used <= total);
    assert_eq!(snap.avail(ByteScale::Byte), total - used);
    assert!((0..=100).contains(&snap.percent_used()));

    // Byte counts are whole numbers well under 2^53, so integer math is exact.
    let expected = (used as u128 * 100).div_ceil(total as u128);
    assert_eq!(snap.percent_used(), expected as i64);
}

#[cfg(unix)]
#[test]
fn any_directory_reports_its_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let snap = query(dir.path()).unwrap();
    assert!(snap.total(ByteScale::Kilobyte) > 0.0);
}

#[cfg(unix)]
#[test]
fn missing_path_is_an_os_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = query(&missing).unwrap_err();
    let Error::Query { path, .. } = &err;
    assert_eq!(path, &missing);
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.raw_os_error(), Some(2));
    assert!(std::error::Error::source(&err).is_some());
}

#[cfg(unix)]
#[test]
fn concurrent_queries_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| query("/").map(|s| s.total(ByteScale::Byte))))
        .collect();
    for h in handles {
        assert!(h.join().unwrap().unwrap() > 0.0);
    }
}
