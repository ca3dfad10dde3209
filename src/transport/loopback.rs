//! In-memory transport for tests and hardware-free dry runs
//!
//! Two independent byte lanes: `inject` feeds bytes that later come out
//! of `read`, and everything passed to `write` accumulates for
//! `take_written`. No framing, no timing.

use super::Transport;
use crate::error::Result;
use std::collections::VecDeque;

#[derive(Default)]
pub struct LoopbackTransport {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for a later `read`
    pub fn inject(&mut self, data: &[u8]) {
        self.rx.extend(data);
    }

    /// Take every byte written so far
    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }
}

impl Transport for LoopbackTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let n = buffer.len().min(self.rx.len());
        for slot in buffer.iter_mut().take(n) {
            // Length-checked above, pop cannot fail
            *slot = self.rx.pop_front().unwrap_or(0);
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn available(&mut self) -> Result<usize> {
        Ok(self.rx.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_then_read() {
        let mut t = LoopbackTransport::new();
        t.inject(&[1, 2, 3, 4]);
        assert_eq!(t.available().unwrap(), 4);

        let mut buf = [0u8; 3];
        assert_eq!(t.read(&mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(t.read(&mut buf).unwrap(), 1);
    }

    #[test]
    fn test_writes_accumulate() {
        let mut t = LoopbackTransport::new();
        t.write(&[9, 8]).unwrap();
        t.write(&[7]).unwrap();
        assert_eq!(t.take_written(), vec![9, 8, 7]);
        assert!(t.take_written().is_empty());
    }
}
