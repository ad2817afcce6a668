#![cfg(test)]

use std::collections::HashSet;
use std::io::{Read, Seek, SeekFrom, Write};
use std::num::NonZeroUsize;

use super::*;

fn read_all(path: &std::path::Path) -> String {
    let mut contents = String::new();
    FileStream::open_read(path)
        .and_then(|mut stream| stream.read_to_string(&mut contents))
        .expect("file should be readable");
    contents
}

#[test]
fn test_random_file_name() {
    let names: HashSet<String> = (0..100).map(|_| random_file_name()).collect();
    assert_eq!(names.len(), 100, "Random names shouldn't repeat.");

    for name in names {
        assert_eq!(name.len(), 12, "Names should be 8.3, got {name:?}.");
        assert_eq!(name.find('.'), Some(8));
        assert!(name.bytes().all(|b| b == b'.' || b.is_ascii_lowercase() || b.is_ascii_digit()));
    }
}

#[test]
fn test_create_unique() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    let dir = root.path().join("nested").join("deeper");

    let first = create_unique(&dir, None).expect("file should be created");
    let second = create_unique(&dir, NonZeroUsize::new(1)).expect("file should be created");

    assert_ne!(first, second, "Each call should create a new file.");
    assert!(dir.is_dir(), "Missing directories should be created.");
    for path in [&first, &second] {
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert_eq!(
            std::fs::metadata(path).expect("file should exist").len(), 0,
            "New files should be empty."
        );
    }
}

#[test]
fn test_create_unique_bad_dir() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    let not_a_dir = root.path().join("file");
    std::fs::write(&not_a_dir, b"").expect("file should be written");

    let error = create_unique(&not_a_dir.join("sub"), None)
        .expect_err("a directory can't be created under a file");
    assert!(error.is_io(), "Directory errors should be returned immediately, got {error:?}.");
}

#[test]
fn test_create_unique_exhausted() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    std::fs::write(root.path().join("taken.txt"), b"kept").expect("file should be written");

    let mut calls = 0;
    let error = create_unique_named(root.path(), NonZeroUsize::new(3), || {
        calls += 1;
        "taken.txt".to_owned()
    })
    .expect_err("every candidate name is taken");

    assert_eq!(calls, 3, "A new name should be picked for every attempt.");
    match error {
        CreateUniqueError::AttemptsExhausted(exhausted) => {
            assert_eq!(exhausted.attempts, 3, "Every allowed attempt should be made.");
            assert_eq!(exhausted.source.kind(), std::io::ErrorKind::AlreadyExists);
        },
        other => panic!("expected exhausted attempts, got {other:?}"),
    }
    assert_eq!(
        read_all(&root.path().join("taken.txt")), "kept",
        "Existing files should never be reused."
    );
}

#[test]
fn test_create_unique_retries_taken_names() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    std::fs::write(root.path().join("taken.txt"), b"").expect("file should be written");

    let mut names = ["taken.txt", "taken.txt", "free.txt"].into_iter();
    let path = create_unique_named(root.path(), None, || {
        names.next().expect("a free name should be reached").to_owned()
    })
    .expect("the free name should be used");

    assert_eq!(path, root.path().join("free.txt"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_create_unique_permanent_error() {
    // procfs exists but never allows new files to be created.
    for max_attempts in [None, NonZeroUsize::new(3)] {
        let mut calls = 0;
        let error = create_unique_named("/proc/self".as_ref(), max_attempts, || {
            calls += 1;
            random_file_name()
        })
        .expect_err("files can't be created in procfs");

        assert!(error.is_io(), "Permanent errors shouldn't be retried, got {error:?}.");
        assert_eq!(calls, 1, "Only one attempt should be made.");
    }

    let error = create_unique("/proc/self".as_ref(), None)
        .expect_err("files can't be created in procfs");
    assert!(error.is_io(), "Unbounded attempts should still stop on permanent errors.");
}

#[test]
fn test_stream_modes() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    let path = root.path().join("stream");

    FileStream::open_write(&path)
        .and_then(|mut stream| stream.write_all(b"Hello world!"))
        .expect("file should be writable");
    assert_eq!(read_all(&path), "Hello world!");

    FileStream::open_write(&path)
        .and_then(|mut stream| stream.write_all(b"Bye"))
        .expect("file should be writable");
    assert_eq!(read_all(&path), "Bye", "Opening for write should truncate.");

    FileStream::open_append(&path)
        .and_then(|mut stream| stream.write_all(b" now"))
        .expect("file should be appendable");
    assert_eq!(read_all(&path), "Bye now", "Opening for append should keep the contents.");

    let mut stream = FileStream::open_read(&path).expect("file should be readable");
    assert_eq!(stream.seek(SeekFrom::End(-3)).expect("seek should succeed"), 4);
    let mut tail = String::new();
    stream.read_to_string(&mut tail).expect("file should be readable");
    assert_eq!(tail, "now");
    stream.close().expect("close should succeed");
}

#[test]
fn test_unlink() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    let path = create_unique(root.path(), None).expect("file should be created");

    unlink(&path).expect("file should be removed");
    assert!(!path.exists());
    unlink(&path).expect("removing a missing file should succeed");
}
