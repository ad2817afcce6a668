use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{ScopedTempFileManager, TempBacking, TempFileError, TempStorage};
use crate::disposably::AlreadyReleasedError;

type Buffer = Arc<Mutex<Option<Vec<u8>>>>;

/// A temporary file held in memory. Useful as a low latency scratch pad, or in tests.
#[derive(Debug)]
pub struct MemoryFile {
    buf: Buffer,
}

impl MemoryFile {
    pub fn new() -> MemoryFile {
        MemoryFile {
            buf: Arc::new(Mutex::new(Some(Vec::new()))),
        }
    }

    fn stream(&self, pos: u64, append: bool) -> MemoryStream {
        MemoryStream {
            buf: self.buf.clone(),
            pos,
            append,
        }
    }
}

impl Default for MemoryFile {
    fn default() -> Self {
        MemoryFile::new()
    }
}

impl TempBacking for MemoryFile {
    type Stream = MemoryStream;

    fn open_read(&mut self) -> io::Result<MemoryStream> {
        Ok(self.stream(0, false))
    }

    fn open_write(&mut self) -> io::Result<MemoryStream> {
        with_contents(&self.buf, Vec::clear)?;
        Ok(self.stream(0, false))
    }

    fn open_append(&mut self) -> io::Result<MemoryStream> {
        let len = with_contents(&self.buf, |contents| contents.len())?;
        Ok(self.stream(len as u64, true))
    }

    fn reclaim(&mut self) -> io::Result<()> {
        self.buf.lock().take();
        Ok(())
    }
}

/// A cursor over the contents of a [`MemoryFile`]. Streams opened for append always write at the
/// end of the contents, like a file opened with `O_APPEND`.
///
/// Once the file is released, every operation fails.
#[derive(Debug)]
pub struct MemoryStream {
    buf: Buffer,
    pos: u64,
    append: bool,
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pos = self.pos;
        let count = with_contents(&self.buf, |contents| {
            let start = usize::try_from(pos).map_or(contents.len(), |p| p.min(contents.len()));
            let count = buf.len().min(contents.len() - start);
            buf[..count].copy_from_slice(&contents[start..start + count]);
            count
        })?;
        self.pos += count as u64;
        Ok(count)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (pos, append) = (self.pos, self.append);
        self.pos = with_contents(&self.buf, |contents| -> io::Result<u64> {
            let start = if append {
                contents.len()
            } else {
                usize::try_from(pos).map_err(|_| io::ErrorKind::InvalidInput)?
            };
            let end = start.checked_add(buf.len()).ok_or(io::ErrorKind::InvalidInput)?;
            contents
                .try_reserve(end.saturating_sub(contents.len()))
                .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
            if start > contents.len() {
                contents.resize(start, 0);
            }

            let overlap = buf.len().min(contents.len() - start);
            contents[start..start + overlap].copy_from_slice(&buf[..overlap]);
            contents.extend_from_slice(&buf[overlap..]);
            Ok(end as u64)
        })??;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        with_contents(&self.buf, |_| ())
    }
}

impl Seek for MemoryStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = with_contents(&self.buf, |contents| contents.len() as u64)?;
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(offset) => len.checked_add_signed(offset),
            SeekFrom::Current(offset) => self.pos.checked_add_signed(offset),
        };

        match target {
            Some(target) => {
                self.pos = target;
                Ok(target)
            },
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

fn with_contents<T>(buf: &Buffer, f: impl FnOnce(&mut Vec<u8>) -> T) -> io::Result<T> {
    match buf.lock().as_mut() {
        Some(contents) => Ok(f(contents)),
        None => Err(io::Error::other(AlreadyReleasedError::of::<MemoryFile>())),
    }
}

/// Allocates [`MemoryFile`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStorage;

impl TempStorage for MemoryStorage {
    type Backing = MemoryFile;

    fn allocate(&mut self) -> Result<MemoryFile, TempFileError> {
        Ok(MemoryFile::new())
    }
}

pub type MemoryTempFileManager = ScopedTempFileManager<MemoryStorage>;
