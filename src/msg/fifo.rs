//! Single-producer/single-consumer byte queue between the link driver and
//! the frame codec
//!
//! Fixed-capacity ring with O(1) cursor advance. Exactly one producer
//! (the receive path) and one consumer (the decode path) touch a given
//! queue; producer and consumer never run concurrently within the
//! cooperative superloop, so no locking is needed.

/// Fixed-capacity byte ring queue
///
/// Const parameter `N` sets the capacity. The default fits several
/// maximum-size frames of backlog.
pub struct ByteQueue<const N: usize = 1024> {
    data: [u8; N],
    write: usize, // next empty slot
    read: usize,  // first valid byte
    len: usize,
    staging: [u8; 256], // contiguous view of wrapped spans
}

impl<const N: usize> ByteQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            data: [0u8; N],
            write: 0,
            read: 0,
            len: 0,
            staging: [0u8; 256],
        }
    }

    /// Number of bytes available to read
    #[inline]
    pub fn available(&self) -> usize {
        self.len
    }

    /// Free space remaining
    #[inline]
    pub fn free(&self) -> usize {
        N - self.len
    }

    /// Append bytes, returning how many were accepted
    ///
    /// Bytes beyond the free space are not written; the caller decides
    /// whether a short write is an overrun worth reporting.
    pub fn push(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.free());
        for &b in &bytes[..n] {
            self.data[self.write] = b;
            self.write = (self.write + 1) % N;
        }
        self.len += n;
        n
    }

    /// Copy up to `out.len()` bytes out of the queue, consuming them
    pub fn pop(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.len);
        for slot in out[..n].iter_mut() {
            *slot = self.data[self.read];
            self.read = (self.read + 1) % N;
        }
        self.len -= n;
        n
    }

    /// Discard `n` bytes from the front - O(1)
    #[inline]
    pub fn advance(&mut self, n: usize) {
        let n = n.min(self.len);
        self.read = (self.read + n) % N;
        self.len -= n;
    }

    /// Read the byte at logical offset `index` without consuming
    #[inline]
    pub fn peek(&self, index: usize) -> Option<u8> {
        if index < self.len {
            Some(self.data[(self.read + index) % N])
        } else {
            None
        }
    }

    /// Borrow a contiguous view of `len` bytes starting at logical
    /// offset `start`, without consuming
    ///
    /// If the span wraps the ring boundary it is copied into an internal
    /// staging buffer, so the view is limited to the staging size.
    pub fn view(&mut self, start: usize, len: usize) -> Option<&[u8]> {
        if start + len > self.len || len > self.staging.len() {
            return None;
        }

        let first = (self.read + start) % N;
        if first + len <= N {
            return Some(&self.data[first..first + len]);
        }

        for i in 0..len {
            self.staging[i] = self.data[(first + i) % N];
        }
        Some(&self.staging[..len])
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
