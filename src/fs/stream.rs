use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use libc::{O_APPEND, O_CREAT, O_RDONLY, O_TRUNC, O_WRONLY, c_int, c_uint};

use super::Fd;

pub(crate) const DEFAULT_MODE: c_uint = 0o600;

/// An unbuffered byte stream over an open file.
#[derive(Debug)]
pub struct FileStream {
    fd: Fd,
}

impl FileStream {
    fn open(path: &Path, flags: c_int) -> io::Result<FileStream> {
        Ok(FileStream {
            fd: Fd::open(path, flags, DEFAULT_MODE)?,
        })
    }

    /// Opens an existing file for reading, from the start.
    pub fn open_read<P: AsRef<Path>>(path: P) -> io::Result<FileStream> {
        FileStream::open(path.as_ref(), O_RDONLY)
    }

    /// Opens a file for writing, creating it if missing and truncating it otherwise.
    pub fn open_write<P: AsRef<Path>>(path: P) -> io::Result<FileStream> {
        FileStream::open(path.as_ref(), O_WRONLY | O_CREAT | O_TRUNC)
    }

    /// Opens a file for writing at its end, creating it if missing.
    pub fn open_append<P: AsRef<Path>>(path: P) -> io::Result<FileStream> {
        FileStream::open(path.as_ref(), O_WRONLY | O_CREAT | O_APPEND)
    }

    /// Flushes written data through to the storage device.
    pub fn sync(&self) -> io::Result<()> {
        self.fd.sync()
    }

    /// Closes the stream, returning any error that dropping it would have ignored.
    pub fn close(self) -> io::Result<()> {
        self.fd.close()
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fd.read(buf)
    }
}

impl Write for FileStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.fd.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Writes go straight to the descriptor, there is nothing buffered here.
        Ok(())
    }
}

impl Seek for FileStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.fd.seek(pos)
    }
}
