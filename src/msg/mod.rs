//! Message layer: framing, registry, and codec for the supervisory link
//!
//! Frame structure on the wire (all fields little-endian):
//!
//! ```text
//!  ________________________________________
//! |id:8|length:8|token:16|body~|crc16:16   |
//! |______________________|_____|___________|
//! |         head         |body |   crc     |
//! |________________________________________|
//! ```
//!
//! `length` is the body byte count; a complete frame is
//! `length + MSG_OVERHEAD` bytes. The 16-bit `token` is a per-kind magic
//! used as a lightweight schema check, independent of the CRC: a head
//! whose `(id, length, token)` triple does not match a registry row is
//! rejected before any CRC work is done, which keeps resynchronization
//! on a corrupted stream down to a single discarded byte.

pub mod body;
pub mod codec;
pub mod crc;
pub mod fifo;
pub mod kind;

pub use body::Msg;
pub use codec::{LinkStats, MsgCodec};
pub use fifo::ByteQueue;
pub use kind::{KindSet, MsgKind};

/// Smallest possible frame: empty body, head and CRC only
pub const MSG_LEN_MIN: usize = 6;
/// Largest frame accepted on the wire
pub const MSG_LEN_MAX: usize = 256;
/// Head byte count
pub const MSG_HEAD_LEN: usize = 4;
/// Trailing CRC byte count
pub const MSG_CRC_LEN: usize = 2;
/// Fixed per-frame overhead (head + CRC)
pub const MSG_OVERHEAD: usize = MSG_HEAD_LEN + MSG_CRC_LEN;

/// Message head: the leading 4 bytes of every frame
///
/// Packs as the 32-bit word `id | length << 8 | token << 16`, serialized
/// little-endian. Byte order is fixed by this pair of functions, not by
/// any host-dependent bitfield layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsgHead {
    /// Message kind id
    pub id: u8,
    /// Body byte count
    pub length: u8,
    /// Per-kind schema token
    pub token: u16,
}

impl MsgHead {
    /// Serialize to the 4-byte wire form
    #[inline]
    pub const fn pack(&self) -> [u8; MSG_HEAD_LEN] {
        [
            self.id,
            self.length,
            (self.token & 0xff) as u8,
            (self.token >> 8) as u8,
        ]
    }

    /// Parse the 4-byte wire form
    #[inline]
    pub const fn unpack(bytes: [u8; MSG_HEAD_LEN]) -> Self {
        Self {
            id: bytes[0],
            length: bytes[1],
            token: (bytes[2] as u16) | ((bytes[3] as u16) << 8),
        }
    }

    /// The head as a single 32-bit word
    #[inline]
    pub const fn word(&self) -> u32 {
        (self.id as u32) | ((self.length as u32) << 8) | ((self.token as u32) << 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_pack_unpack() {
        let head = MsgHead {
            id: 0x04,
            length: 40,
            token: 0xff14,
        };
        let bytes = head.pack();
        assert_eq!(bytes, [0x04, 40, 0x14, 0xff]);
        assert_eq!(MsgHead::unpack(bytes), head);
    }

    #[test]
    fn test_head_word_layout() {
        let head = MsgHead {
            id: 0x0b,
            length: 10,
            token: 0xff1b,
        };
        assert_eq!(head.word(), 0xff1b_0a0b);
        assert_eq!(head.word().to_le_bytes(), head.pack());
    }
}
