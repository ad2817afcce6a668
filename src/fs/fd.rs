use std::ffi::CString;
use std::fmt::{self, Debug, Formatter};
use std::io::{self, SeekFrom};
use std::mem::ManuallyDrop;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use libc::{SEEK_CUR, SEEK_END, SEEK_SET, c_int, c_uint, off_t};

/// An owned file descriptor, closed when dropped.
pub(crate) struct Fd(c_int);

impl Fd {
    pub fn open(path: &Path, flags: c_int, mode: c_uint) -> io::Result<Fd> {
        let pathname = CString::new(path.as_os_str().as_bytes())?;

        // SAFETY: pathname is a valid nul-terminated string which outlives the call.
        match unsafe { libc::open(pathname.as_ptr(), flags | libc::O_CLOEXEC, mode) } {
            -1 => Err(io::Error::last_os_error()),
            fd => Ok(Fd(fd)),
        }
    }

    pub fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: buf is valid for writes of buf.len() bytes.
        match unsafe { libc::read(self.0, buf.as_mut_ptr().cast(), buf.len()) } {
            -1 => Err(io::Error::last_os_error()),
            count => Ok(count as usize),
        }
    }

    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        // SAFETY: buf is valid for reads of buf.len() bytes.
        match unsafe { libc::write(self.0, buf.as_ptr().cast(), buf.len()) } {
            -1 => Err(io::Error::last_os_error()),
            count => Ok(count as usize),
        }
    }

    pub fn seek(&self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(offset) => (offset as off_t, SEEK_SET),
            SeekFrom::End(offset) => (offset as off_t, SEEK_END),
            SeekFrom::Current(offset) => (offset as off_t, SEEK_CUR),
        };

        // SAFETY: lseek has no memory safety requirements.
        match unsafe { libc::lseek(self.0, offset, whence) } {
            -1 => Err(io::Error::last_os_error()),
            position => Ok(position as u64),
        }
    }

    pub fn sync(&self) -> io::Result<()> {
        // SAFETY: fsync has no memory safety requirements.
        match unsafe { libc::fsync(self.0) } {
            -1 => Err(io::Error::last_os_error()),
            _ => Ok(()),
        }
    }

    pub fn close(self) -> io::Result<()> {
        // close invalidates the descriptor regardless of the outcome, so Drop mustn't try again.
        let fd = ManuallyDrop::new(self);
        // SAFETY: fd is owned and never used again.
        match unsafe { libc::close(fd.0) } {
            -1 => Err(io::Error::last_os_error()),
            _ => Ok(()),
        }
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // SAFETY: We are dropping self, so the invalidated descriptor is never used again.
        if unsafe { libc::close(self.0) } == -1 {
            tracing::warn!(
                fd = self.0,
                error = %io::Error::last_os_error(),
                "error while closing file descriptor"
            );
        }
    }
}

impl Debug for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fd({})", self.0)
    }
}

/// Removes the file at `path`. A file that no longer exists is considered removed.
pub(crate) fn unlink(path: &Path) -> io::Result<()> {
    let pathname = CString::new(path.as_os_str().as_bytes())?;

    // SAFETY: pathname is a valid nul-terminated string which outlives the call.
    if unsafe { libc::unlink(pathname.as_ptr()) } == -1 {
        let error = io::Error::last_os_error();
        if error.raw_os_error() != Some(libc::ENOENT) {
            return Err(error);
        }
    }
    Ok(())
}
