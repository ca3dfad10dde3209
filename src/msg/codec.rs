//! Frame codec: encode/decode messages over the byte queue
//!
//! Decode order is deliberate: head schema check (id, length, token
//! against the registry) before any CRC work. A corrupted stream is
//! resynchronized by discarding a single byte, because a length field
//! from an unverified head is never trusted to skip forward. Only once
//! the head matches a registry row is the CRC computed, and a CRC
//! failure then drops the whole (schema-valid) frame and waits for the
//! next one.
//!
//! Codec errors never escalate: callers drop or retry locally, and the
//! [`LinkStats`] counters are the diagnostic record.

use super::body::Msg;
use super::crc::crc16;
use super::fifo::ByteQueue;
use super::kind::MsgKind;
use super::{MSG_CRC_LEN, MSG_HEAD_LEN, MSG_LEN_MAX, MSG_LEN_MIN, MSG_OVERHEAD, MsgHead};
use crate::error::{Error, Result};

/// Aggregate link diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Frames successfully encoded
    pub frames_out: u64,
    /// Frames successfully decoded
    pub frames_in: u64,
    /// Heads with an unregistered id (1-byte resyncs)
    pub unknown_id: u64,
    /// Heads whose length/token disagreed with the registry
    pub schema_mismatch: u64,
    /// Schema-valid frames dropped on CRC failure
    pub checksum_mismatch: u64,
}

/// Message frame codec over a [`ByteQueue`]
///
/// Owns the transient encode/decode scratch buffer; the byte queue is
/// supplied per call so one codec can serve both link directions.
pub struct MsgCodec {
    scratch: [u8; MSG_LEN_MAX],
    stats: LinkStats,
}

impl MsgCodec {
    pub const fn new() -> Self {
        Self {
            scratch: [0u8; MSG_LEN_MAX],
            stats: LinkStats {
                frames_out: 0,
                frames_in: 0,
                unknown_id: 0,
                schema_mismatch: 0,
                checksum_mismatch: 0,
            },
        }
    }

    /// Diagnostic counters
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Encode `msg` as a complete frame and append it to the queue
    ///
    /// Head length and token come from the registry, never from the
    /// body. Returns the total bytes written.
    pub fn push<const N: usize>(&mut self, queue: &mut ByteQueue<N>, msg: &Msg) -> Result<usize> {
        let kind = msg.kind();
        let head = kind.head();
        let body_len = head.length as usize;
        let total = body_len + MSG_OVERHEAD;

        if total > MSG_LEN_MAX {
            return Err(Error::LengthOverflow { len: total });
        }
        let free = queue.free();
        if free < total {
            return Err(Error::QueueFull {
                needed: total,
                free,
            });
        }

        self.scratch[..MSG_HEAD_LEN].copy_from_slice(&head.pack());
        msg.encode_body(&mut self.scratch[MSG_HEAD_LEN..MSG_HEAD_LEN + body_len]);
        let crc = crc16(&self.scratch[..MSG_HEAD_LEN + body_len]);
        self.scratch[MSG_HEAD_LEN + body_len..total].copy_from_slice(&crc.to_le_bytes());

        queue.push(&self.scratch[..total]);
        self.stats.frames_out += 1;
        Ok(total)
    }

    /// Decode one frame from the front of the queue
    ///
    /// Returns `Ok(None)` when no complete frame is buffered yet
    /// (nothing is consumed; retry once more bytes arrive). On
    /// `UnknownId`/`SchemaMismatch` exactly one byte is discarded; on
    /// `ChecksumMismatch` the whole frame is discarded.
    pub fn pop<const N: usize>(&mut self, queue: &mut ByteQueue<N>) -> Result<Option<Msg>> {
        if queue.available() < MSG_LEN_MIN {
            return Ok(None);
        }

        let head_bytes = [
            queue.peek(0).unwrap_or(0),
            queue.peek(1).unwrap_or(0),
            queue.peek(2).unwrap_or(0),
            queue.peek(3).unwrap_or(0),
        ];
        let head = MsgHead::unpack(head_bytes);

        let Some(kind) = MsgKind::from_id(head.id) else {
            queue.advance(1);
            self.stats.unknown_id += 1;
            return Err(Error::UnknownId { id: head.id });
        };

        if head.length != kind.body_len() || head.token != kind.token() {
            queue.advance(1);
            self.stats.schema_mismatch += 1;
            log::debug!(
                "schema mismatch for id 0x{:02x}: length={} token=0x{:04x}",
                head.id,
                head.length,
                head.token
            );
            return Err(Error::SchemaMismatch {
                id: head.id,
                length: head.length,
                token: head.token,
            });
        }

        let body_len = head.length as usize;
        let total = body_len + MSG_OVERHEAD;
        if queue.available() < total {
            return Ok(None);
        }

        let covered = MSG_HEAD_LEN + body_len;
        // Schema is valid from here on, so `total` can be trusted
        let computed = match queue.view(0, covered) {
            Some(bytes) => crc16(bytes),
            None => return Ok(None),
        };
        let stored = u16::from_le_bytes([
            queue.peek(covered).unwrap_or(0),
            queue.peek(covered + MSG_CRC_LEN - 1).unwrap_or(0),
        ]);

        if computed != stored {
            queue.advance(total);
            self.stats.checksum_mismatch += 1;
            log::warn!(
                "dropping {:?} frame: crc 0x{:04x} != 0x{:04x}",
                kind,
                stored,
                computed
            );
            return Err(Error::ChecksumMismatch {
                expected: computed,
                actual: stored,
            });
        }

        let msg = match queue.view(MSG_HEAD_LEN, body_len) {
            Some(body) => Msg::decode_body(kind, body),
            None => return Ok(None),
        };
        queue.advance(total);
        self.stats.frames_in += 1;
        Ok(Some(msg))
    }

    /// Drain the queue into decoded messages, recovering from codec
    /// errors in place
    ///
    /// Resync/drop recovery already happened inside `pop`; this just
    /// keeps pulling until the queue has no complete frame left.
    pub fn drain<const N: usize>(&mut self, queue: &mut ByteQueue<N>, out: &mut Vec<Msg>) {
        loop {
            match self.pop(queue) {
                Ok(Some(msg)) => out.push(msg),
                Ok(None) => break,
                Err(_) => continue,
            }
        }
    }
}

impl Default for MsgCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::body::{OdoMsg, PtzMsg, SubscMsg, ZGyroMsg};

    fn queue() -> ByteQueue<1024> {
        ByteQueue::new()
    }

    #[test]
    fn test_round_trip_single() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        let msg = Msg::Ptz(PtzMsg {
            frame_id: 11,
            p: 1500,
            t: -300,
            z: 0,
        });
        let written = codec.push(&mut q, &msg).unwrap();
        assert_eq!(written, 10 + MSG_OVERHEAD);

        let back = codec.pop(&mut q).unwrap().unwrap();
        assert_eq!(back, msg);
        assert_eq!(q.available(), 0);
    }

    #[test]
    fn test_round_trip_all_kinds() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        for kind in MsgKind::ALL {
            let msg = Msg::default_of(kind);
            codec.push(&mut q, &msg).unwrap();
            let back = codec.pop(&mut q).unwrap().unwrap();
            assert_eq!(back.kind(), kind);
            assert_eq!(back, msg);
        }
        assert_eq!(codec.stats().frames_in, MsgKind::ALL.len() as u64);
    }

    #[test]
    fn test_underrun_is_incomplete_not_error() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        // One byte short of the smallest possible frame
        q.push(&[0u8; MSG_LEN_MIN - 1]);
        assert!(codec.pop(&mut q).unwrap().is_none());
        assert_eq!(q.available(), MSG_LEN_MIN - 1, "nothing consumed");
    }

    #[test]
    fn test_partial_frame_not_consumed() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        let msg = Msg::Odo(OdoMsg {
            frame_id: 3,
            ..OdoMsg::default()
        });
        codec.push(&mut q, &msg).unwrap();

        // Withhold the last two bytes
        let mut full = [0u8; 46];
        q.pop(&mut full);
        q.push(&full[..44]);

        assert!(codec.pop(&mut q).unwrap().is_none());
        assert_eq!(q.available(), 44);

        q.push(&full[44..]);
        assert_eq!(codec.pop(&mut q).unwrap().unwrap(), msg);
    }

    #[test]
    fn test_unknown_id_resyncs_one_byte() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        q.push(&[0xee; 3]); // garbage prefix
        let msg = Msg::ZGyro(ZGyroMsg {
            frame_id: 5,
            angle: 4500,
            rate: 100,
        });
        codec.push(&mut q, &msg).unwrap();

        let mut errors = 0;
        let recovered = loop {
            match codec.pop(&mut q) {
                Ok(Some(m)) => break m,
                Ok(None) => panic!("ran out of bytes before resync"),
                Err(Error::UnknownId { id: 0xee }) => errors += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        };
        assert_eq!(errors, 3, "exactly the corrupted prefix was consumed");
        assert_eq!(recovered, msg);
    }

    #[test]
    fn test_schema_mismatch_on_bad_token() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        let msg = Msg::Subsc(SubscMsg {
            frame_id: 1,
            msg_type: 0b1000,
        });
        codec.push(&mut q, &msg).unwrap();

        // Corrupt the token high byte: id stays valid, schema does not
        let mut frame = [0u8; 14];
        q.pop(&mut frame);
        frame[3] = 0x00;
        q.push(&frame);

        assert!(matches!(
            codec.pop(&mut q),
            Err(Error::SchemaMismatch { id: 0x0e, .. })
        ));
        assert_eq!(q.available(), 13, "resync discards a single byte");
    }

    #[test]
    fn test_checksum_mismatch_drops_whole_frame() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        let bad = Msg::Ptz(PtzMsg {
            frame_id: 2,
            p: 100,
            t: 200,
            z: 300,
        });
        let good = Msg::ZGyro(ZGyroMsg {
            frame_id: 3,
            angle: -900,
            rate: 7,
        });
        codec.push(&mut q, &bad).unwrap();
        codec.push(&mut q, &good).unwrap();

        // Flip one body bit of the first frame
        let mut bytes = [0u8; 32];
        let n = q.pop(&mut bytes);
        bytes[6] ^= 0x01;
        q.push(&bytes[..n]);

        assert!(matches!(
            codec.pop(&mut q),
            Err(Error::ChecksumMismatch { .. })
        ));
        // The corrupted frame is gone in one step; the next is intact
        assert_eq!(codec.pop(&mut q).unwrap().unwrap(), good);
        assert_eq!(codec.stats().checksum_mismatch, 1);
    }

    #[test]
    fn test_head_bit_flip_never_decodes_silently() {
        let mut codec = MsgCodec::new();

        let msg = Msg::Ptz(PtzMsg {
            frame_id: 8,
            p: -1,
            t: 1,
            z: 0,
        });

        let mut reference = queue();
        codec.push(&mut reference, &msg).unwrap();
        let mut frame = [0u8; 16];
        let n = reference.pop(&mut frame);

        for byte in 0..n - MSG_CRC_LEN {
            for bit in 0..8 {
                let mut corrupted = frame;
                corrupted[byte] ^= 1 << bit;

                let mut q = queue();
                q.push(&corrupted[..n]);
                match codec.pop(&mut q) {
                    Ok(Some(decoded)) => {
                        panic!("byte {byte} bit {bit}: silently decoded {decoded:?}")
                    }
                    Ok(None) | Err(_) => {}
                }
            }
        }
    }

    #[test]
    fn test_drain_recovers_past_corruption() {
        let mut codec = MsgCodec::new();
        let mut q = queue();

        q.push(&[0xba, 0xad]);
        let msg = Msg::Ptz(PtzMsg {
            frame_id: 21,
            p: 5,
            t: 6,
            z: 7,
        });
        codec.push(&mut q, &msg).unwrap();

        let mut out = Vec::new();
        codec.drain(&mut q, &mut out);
        assert_eq!(out, vec![msg]);
    }
}
