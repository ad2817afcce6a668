#![cfg(test)]

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use super::*;
use crate::disposably::{Dispose, ReleaseError};
use crate::util::counted::Counter;

fn read_all<B: TempBacking>(file: &ScopedTempFile<B>) -> String {
    let mut contents = String::new();
    file.open_read()
        .expect("file should be live")
        .read_to_string(&mut contents)
        .expect("file should be readable");
    contents
}

fn write_all<B: TempBacking>(stream: Result<B::Stream, TempFileError>, bytes: &[u8]) {
    stream
        .expect("file should be live")
        .write_all(bytes)
        .expect("file should be writable");
}

fn round_trip<S: TempStorage>(manager: &ScopedTempFileManager<S>) {
    let file = manager.new_file().expect("file should be allocated");

    write_all::<S::Backing>(file.open_write(), b"Hello world!");
    assert_eq!(read_all(&file), "Hello world!");

    write_all::<S::Backing>(file.open_write(), b"Bye");
    assert_eq!(read_all(&file), "Bye", "Opening for write should truncate the file.");
}

fn append<S: TempStorage>(manager: &ScopedTempFileManager<S>) {
    let file = manager.new_file().expect("file should be allocated");

    write_all::<S::Backing>(file.open_write(), b"Hello world!");
    write_all::<S::Backing>(file.open_append(), b" How's the day going?");
    assert_eq!(read_all(&file), "Hello world! How's the day going?");
}

#[test]
fn test_memory_round_trip() {
    round_trip(&MemoryTempFileManager::default());
}

#[test]
fn test_memory_append() {
    append(&MemoryTempFileManager::default());
}

#[test]
fn test_local_round_trip() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    round_trip(&LocalTempFileManager::in_dir(root.path().join("files")));
}

#[test]
fn test_local_append() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    append(&LocalTempFileManager::in_dir(root.path().join("files")));
}

#[test]
fn test_cascade() {
    let manager = MemoryTempFileManager::default();
    let files: Vec<_> = (0..3)
        .map(|_| manager.new_file().expect("file should be allocated"))
        .collect();
    assert_eq!(manager.tracked_len(), 3);

    manager.dispose().expect("cascade shouldn't fail");
    for file in &files {
        assert!(file.is_disposed(), "Every tracked file should be released with the manager.");
    }
    assert_eq!(manager.tracked_len(), 0);
}

#[test]
fn test_early_release_is_skipped() {
    let manager = MemoryTempFileManager::default();
    let early = manager.new_file().expect("file should be allocated");
    let late = manager.new_file().expect("file should be allocated");
    let released = Counter::new();
    early
        .add_release_action({
            let released = released.clone();
            move || released.bump()
        })
        .expect("file should be live");

    early.dispose().expect("dispose shouldn't fail");
    assert_eq!(manager.tracked_len(), 1, "A released file should stop being tracked.");

    manager.dispose().expect("cascade shouldn't fail");
    assert!(late.is_disposed());
    assert_eq!(released.get(), 1, "An early released file shouldn't be released again.");
}

#[test]
fn test_dropped_file_is_untracked() {
    let manager = MemoryTempFileManager::default();
    let file = manager.new_file().expect("file should be allocated");
    let _kept = manager.new_file().expect("file should be allocated");
    assert_eq!(manager.tracked_len(), 2);

    drop(file);
    assert_eq!(
        manager.tracked_len(), 1,
        "Dropping the last reference should release and untrack the file."
    );
}

#[test]
fn test_released_file() {
    let manager = MemoryTempFileManager::default();
    let file = manager.new_file().expect("file should be allocated");
    let mut stream = file.open_write().expect("file should be live");

    file.dispose().expect("dispose shouldn't fail");
    assert!(file.open_read().is_err_and(|e| e.is_already_released()));
    assert!(file.open_append().is_err_and(|e| e.is_already_released()));
    assert!(file.add_release_action(|| ()).is_err());
    assert!(
        stream.write_all(b"late").is_err(),
        "Streams outliving their file should stop working."
    );
    assert!(stream.seek(SeekFrom::Start(0)).is_err());
}

#[test]
fn test_released_manager() {
    let manager = MemoryTempFileManager::default();
    manager.dispose().expect("dispose shouldn't fail");

    let error = manager.new_file().expect_err("a released manager can't allocate");
    assert!(error.is_already_released());
    assert!(error.to_string().contains("ScopedTempFileManager"), "got: {error}");
}

#[test]
fn test_local_files_are_deleted() {
    let root = tempfile::tempdir().expect("temp dir should be created");
    let dir = root.path().join("files");
    let manager = LocalTempFileManager::in_dir(&dir);

    let early = manager.new_file().expect("file should be allocated");
    let late = manager.new_file().expect("file should be allocated");
    let early_path = early.path().expect("file should be live");
    let late_path = late.path().expect("file should be live");
    assert_eq!(early_path.parent(), Some(dir.as_path()));
    assert!(early_path.is_file() && late_path.is_file());

    early.dispose().expect("dispose shouldn't fail");
    assert!(!early_path.exists(), "A released file should be deleted.");
    assert!(early.path().is_err());

    manager.dispose().expect("cascade shouldn't fail");
    assert!(!late_path.exists(), "Files should be deleted with their manager.");
    assert!(!dir.exists(), "The manager's own directory should be deleted.");
}

#[test]
fn test_system_dir_is_kept() {
    let manager = LocalTempFileManager::system();
    let file = manager.new_file().expect("file should be allocated");
    let path = file.path().expect("file should be live");
    assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));

    drop(manager);
    assert!(file.is_disposed(), "Dropping the manager should release its files.");
    assert!(!path.exists());
    assert!(std::env::temp_dir().is_dir());
}

#[test]
fn test_standalone_file() {
    let file = ScopedTempFile::new(MemoryFile::new());
    write_all::<MemoryFile>(file.open_write(), b"standalone");
    assert_eq!(read_all(&file), "standalone");

    let other = ScopedTempFile::new(MemoryFile::new());
    assert_ne!(file.id(), other.id(), "Every file should get its own id.");
}

#[test]
fn test_memory_stream() {
    let mut backing = MemoryFile::new();
    let mut writer = backing.open_write().expect("file should be writable");
    writer.write_all(b"0123456789").expect("write shouldn't fail");
    writer.seek(SeekFrom::Start(2)).expect("seek shouldn't fail");
    writer.write_all(b"ab").expect("write shouldn't fail");

    let mut appender = backing.open_append().expect("file should be appendable");
    appender.seek(SeekFrom::Start(0)).expect("seek shouldn't fail");
    appender.write_all(b"!").expect("write shouldn't fail");

    let mut reader = backing.open_read().expect("file should be readable");
    assert_eq!(reader.seek(SeekFrom::End(-3)).expect("seek shouldn't fail"), 8);
    let mut tail = String::new();
    reader.read_to_string(&mut tail).expect("read shouldn't fail");
    assert_eq!(tail, "89!", "Appends should always land at the end.");

    reader.seek(SeekFrom::Start(0)).expect("seek shouldn't fail");
    let mut contents = String::new();
    reader.read_to_string(&mut contents).expect("read shouldn't fail");
    assert_eq!(contents, "01ab456789!");

    assert!(
        reader.seek(SeekFrom::Current(-100)).is_err(),
        "Seeking before the start should fail."
    );
}

#[test]
fn test_memory_stream_huge_offset() {
    let mut backing = MemoryFile::new();
    let mut writer = backing.open_write().expect("file should be writable");
    writer.write_all(b"0123456789").expect("write shouldn't fail");

    writer.seek(SeekFrom::Start(u64::MAX / 2)).expect("seeking past the end is allowed");
    assert!(
        writer.write(b"x").is_err(),
        "Writing at an offset that can't be allocated should fail."
    );

    writer.seek(SeekFrom::Start(10)).expect("seek shouldn't fail");
    writer.write_all(b"!").expect("the file should still be usable");

    let mut contents = String::new();
    backing
        .open_read()
        .expect("file should be readable")
        .read_to_string(&mut contents)
        .expect("read shouldn't fail");
    assert_eq!(contents, "0123456789!", "A failed write shouldn't change the contents.");
}

struct Failing;

impl TempBacking for Failing {
    type Stream = io::Cursor<Vec<u8>>;

    fn open_read(&mut self) -> io::Result<Self::Stream> {
        Ok(io::Cursor::default())
    }

    fn open_write(&mut self) -> io::Result<Self::Stream> {
        Ok(io::Cursor::default())
    }

    fn open_append(&mut self) -> io::Result<Self::Stream> {
        Ok(io::Cursor::default())
    }

    fn reclaim(&mut self) -> io::Result<()> {
        Err(io::Error::other("reclaim failed"))
    }
}

#[derive(Default)]
struct SometimesFailing {
    allocated: usize,
}

impl TempStorage for SometimesFailing {
    type Backing = Either;

    fn allocate(&mut self) -> Result<Either, TempFileError> {
        self.allocated += 1;
        Ok(match self.allocated % 2 {
            0 => Either::Failing(Failing),
            _ => Either::Memory(MemoryFile::new()),
        })
    }
}

enum Either {
    Failing(Failing),
    Memory(MemoryFile),
}

impl TempBacking for Either {
    type Stream = io::Cursor<Vec<u8>>;

    fn open_read(&mut self) -> io::Result<Self::Stream> {
        Ok(io::Cursor::default())
    }

    fn open_write(&mut self) -> io::Result<Self::Stream> {
        Ok(io::Cursor::default())
    }

    fn open_append(&mut self) -> io::Result<Self::Stream> {
        Ok(io::Cursor::default())
    }

    fn reclaim(&mut self) -> io::Result<()> {
        match self {
            Either::Failing(failing) => failing.reclaim(),
            Either::Memory(memory) => memory.reclaim(),
        }
    }
}

#[test]
fn test_cascade_continues_after_failure() {
    let manager = ScopedTempFileManager::<SometimesFailing>::default();
    let files: Vec<_> = (0..4)
        .map(|_| manager.new_file().expect("file should be allocated"))
        .collect();

    let error = manager.dispose().expect_err("half of the files fail to release");
    match error {
        ReleaseError::Cascade(cascade) => {
            assert_eq!(cascade.attempted, 4);
            assert_eq!(cascade.failures.len(), 2, "Every failure should be reported.");
            assert!(cascade.failures.iter().all(ReleaseError::is_io));
        },
        other => panic!("expected a cascade error, got {other:?}"),
    }

    for file in &files {
        assert!(file.is_disposed(), "A failure shouldn't stop the rest of the cascade.");
    }
    assert!(manager.dispose().is_ok(), "The cascade shouldn't be retried.");
}

#[test]
fn test_shared_across_threads() {
    let manager = Arc::new(MemoryTempFileManager::default());

    std::thread::scope(|s| {
        for i in 0..8 {
            let manager = &manager;
            s.spawn(move || {
                let file = manager.new_file().expect("file should be allocated");
                write_all::<MemoryFile>(file.open_write(), format!("file {i}").as_bytes());
                assert_eq!(read_all(&file), format!("file {i}"));
            });
        }
    });

    assert_eq!(manager.tracked_len(), 0, "Every file was dropped by its thread.");
}
