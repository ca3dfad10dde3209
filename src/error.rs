//! Error types for yantra-io

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// yantra-io error types
///
/// Codec errors (`UnknownId`, `SchemaMismatch`, `ChecksumMismatch`,
/// `QueueFull`, `LengthOverflow`) are recovered at the decode/encode call
/// site and counted for diagnostics; they never escalate past the link
/// layer. `StaleState` is the only error that changes control behavior.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration serialize error
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Decoded head id is not in the message registry
    ///
    /// The length field of such a frame cannot be trusted; the decoder
    /// resynchronizes by discarding a single byte.
    #[error("Unknown message id: 0x{id:02x}")]
    UnknownId {
        /// Id byte as read from the wire
        id: u8,
    },

    /// Head length/token disagree with the registry row for this id
    #[error("Schema mismatch for id 0x{id:02x}: length={length}, token=0x{token:04x}")]
    SchemaMismatch {
        /// Registered message id
        id: u8,
        /// Length as read from the wire
        length: u8,
        /// Token as read from the wire
        token: u16,
    },

    /// Frame CRC does not match the recomputed value
    #[error("Checksum mismatch: expected 0x{expected:04x}, got 0x{actual:04x}")]
    ChecksumMismatch {
        /// CRC recomputed over head and body
        expected: u16,
        /// CRC as read from the wire
        actual: u16,
    },

    /// Encode request exceeds the wire frame size limit
    #[error("Frame length overflow: {len} bytes")]
    LengthOverflow {
        /// Total frame size that was requested
        len: usize,
    },

    /// Byte queue has no room for a complete frame
    #[error("Byte queue full: need {needed}, free {free}")]
    QueueFull {
        /// Frame size that was being written
        needed: usize,
        /// Free space in the queue
        free: usize,
    },

    /// Sensor feed went stale; the controller has faulted
    #[error("Stale control state")]
    StaleState,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
