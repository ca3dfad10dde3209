//! Transport layer for link I/O abstraction

use crate::error::Result;

mod loopback;
mod serial;
pub use loopback::LoopbackTransport;
pub use serial::SerialTransport;

/// Byte transport to the MCU link
pub trait Transport: Send {
    /// Read bytes into `buffer`, returning the count; 0 means no data
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write all of `data`, returning the count written
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Flush pending writes, blocking until complete
    fn flush(&mut self) -> Result<()>;

    /// Bytes ready to read without blocking
    fn available(&mut self) -> Result<usize> {
        Ok(0)
    }
}
