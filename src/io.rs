//! Byte-stream staging on top of [`ShiftBuffer<u8>`].
//!
//! Decoders that receive input in arbitrary chunks can push every chunk into a
//! `ShiftBuffer<u8>` through [`std::io::Write`] and pull whole records back out through
//! [`std::io::Read`] or [`std::io::BufRead`] once enough bytes have arrived.

use std::io;

use crate::error::ShiftBufferError;
use crate::shift_buffer::ShiftBuffer;

impl From<ShiftBufferError> for io::Error {
    fn from(err: ShiftBufferError) -> Self {
        let kind = if err.is_allocation_failure() {
            io::ErrorKind::OutOfMemory
        } else {
            io::ErrorKind::UnexpectedEof
        };
        io::Error::new(kind, err)
    }
}

impl io::Write for ShiftBuffer<u8> {
    /// Appends all of `buf`; either every byte is accepted or none is.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ShiftBuffer::<u8>::write(self, buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        ShiftBuffer::<u8>::write(self, buf)?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for ShiftBuffer<u8> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = buf.len().min(self.len());
        ShiftBuffer::<u8>::read(self, &mut buf[..count])?;
        Ok(count)
    }
}

impl io::BufRead for ShiftBuffer<u8> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.as_slice())
    }

    fn consume(&mut self, amt: usize) {
        self.discard_front(amt);
    }
}
