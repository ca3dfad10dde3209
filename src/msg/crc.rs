//! CRC-16 for message frames
//!
//! CRC-16/CCITT-FALSE: polynomial 0x1021, init 0xFFFF, no reflection,
//! no final XOR. Computed over `head || body`; the token in the head is a
//! schema check and deliberately plays no part here.

/// Compute the frame CRC over a byte slice
#[inline]
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
