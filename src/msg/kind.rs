//! Message registry: the closed table of link message kinds
//!
//! Every kind carries a fixed `(id, body length, token)` triple and, for
//! kinds whose integer fields encode physical quantities, a unit scale.
//! Ids and tokens are never reused; adding a kind means appending a new
//! pair. The table is immutable and fixed at build time.

use super::MsgHead;

/// Number of registered message kinds
pub const MSG_KIND_COUNT: usize = 21;

/// Message kind tag
///
/// One variant per registry row. Wire ids run 0x01..=0x15 with matching
/// tokens 0xff11..=0xff26 (0xff20 unused).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgKind {
    /// Raw IMU sample (accel + gyro)
    Imu,
    /// Magnetometer sample
    Mag,
    /// UWB position fix
    Uwb,
    /// Odometry snapshot (chassis pose/velocity + gimbal state)
    Odo,
    /// Pan-tilt-zoom measurement
    Ptz,
    /// Virtual remote-control raw frame
    Vrc,
    /// Virtual host-control raw frame
    Vhc,
    /// Attitude quaternion
    Ahrs,
    /// Control-bus command (functional state + chassis/gimbal setpoints)
    CBus,
    /// Virtual digital-bus raw frame
    VDBus,
    /// Single-axis (yaw) gyro
    ZGyro,
    /// Per-motor encoder state
    Motor,
    /// Status / watchdog report
    Statu,
    /// Telemetry subscription request
    Subsc,
    /// Auto-calibration control flags
    Calib,
    /// PID gain calibration payload
    PidCalib,
    /// IMU offset calibration payload
    ImuCalib,
    /// Magnetometer offset calibration payload
    MagCalib,
    /// Velocity scale calibration payload
    VelCalib,
    /// Mecanum geometry calibration payload
    MecCalib,
    /// Gimbal travel calibration payload
    PosCalib,
}

impl MsgKind {
    /// Every registered kind, in id order
    pub const ALL: [MsgKind; MSG_KIND_COUNT] = [
        MsgKind::Imu,
        MsgKind::Mag,
        MsgKind::Uwb,
        MsgKind::Odo,
        MsgKind::Ptz,
        MsgKind::Vrc,
        MsgKind::Vhc,
        MsgKind::Ahrs,
        MsgKind::CBus,
        MsgKind::VDBus,
        MsgKind::ZGyro,
        MsgKind::Motor,
        MsgKind::Statu,
        MsgKind::Subsc,
        MsgKind::Calib,
        MsgKind::PidCalib,
        MsgKind::ImuCalib,
        MsgKind::MagCalib,
        MsgKind::VelCalib,
        MsgKind::MecCalib,
        MsgKind::PosCalib,
    ];

    /// Wire id
    pub const fn id(self) -> u8 {
        match self {
            MsgKind::Imu => 0x01,
            MsgKind::Mag => 0x02,
            MsgKind::Uwb => 0x03,
            MsgKind::Odo => 0x04,
            MsgKind::Ptz => 0x05,
            MsgKind::Vrc => 0x06,
            MsgKind::Vhc => 0x07,
            MsgKind::Ahrs => 0x08,
            MsgKind::CBus => 0x09,
            MsgKind::VDBus => 0x0a,
            MsgKind::ZGyro => 0x0b,
            MsgKind::Motor => 0x0c,
            MsgKind::Statu => 0x0d,
            MsgKind::Subsc => 0x0e,
            MsgKind::Calib => 0x0f,
            MsgKind::PidCalib => 0x10,
            MsgKind::ImuCalib => 0x11,
            MsgKind::MagCalib => 0x12,
            MsgKind::VelCalib => 0x13,
            MsgKind::MecCalib => 0x14,
            MsgKind::PosCalib => 0x15,
        }
    }

    /// Fixed body length in bytes
    ///
    /// Must equal the exact serialized size of the kind's body record;
    /// the registry integrity test pins this against the codecs.
    pub const fn body_len(self) -> u8 {
        match self {
            MsgKind::Imu => 16,
            MsgKind::Mag => 10,
            MsgKind::Uwb => 21,
            MsgKind::Odo => 40,
            MsgKind::Ptz => 10,
            MsgKind::Vrc => 22,
            MsgKind::Vhc => 24,
            MsgKind::Ahrs => 20,
            MsgKind::CBus => 18,
            MsgKind::VDBus => 22,
            MsgKind::ZGyro => 10,
            MsgKind::Motor => 17,
            MsgKind::Statu => 12,
            MsgKind::Subsc => 8,
            MsgKind::Calib => 8,
            MsgKind::PidCalib => 21,
            MsgKind::ImuCalib => 16,
            MsgKind::MagCalib => 10,
            MsgKind::VelCalib => 10,
            MsgKind::MecCalib => 12,
            MsgKind::PosCalib => 12,
        }
    }

    /// Per-kind schema token
    pub const fn token(self) -> u16 {
        match self {
            MsgKind::Imu => 0xff11,
            MsgKind::Mag => 0xff12,
            MsgKind::Uwb => 0xff13,
            MsgKind::Odo => 0xff14,
            MsgKind::Ptz => 0xff15,
            MsgKind::Vrc => 0xff16,
            MsgKind::Vhc => 0xff17,
            MsgKind::Ahrs => 0xff18,
            MsgKind::CBus => 0xff19,
            MsgKind::VDBus => 0xff1a,
            MsgKind::ZGyro => 0xff1b,
            MsgKind::Motor => 0xff1c,
            MsgKind::Statu => 0xff1d,
            MsgKind::Subsc => 0xff1e,
            MsgKind::Calib => 0xff1f,
            MsgKind::PidCalib => 0xff21,
            MsgKind::ImuCalib => 0xff22,
            MsgKind::MagCalib => 0xff23,
            MsgKind::VelCalib => 0xff24,
            MsgKind::MecCalib => 0xff25,
            MsgKind::PosCalib => 0xff26,
        }
    }

    /// Unit scale for kinds carrying fixed-point integer fields
    ///
    /// Raw counts divided by this scale recover physical units (e.g. an
    /// ODO velocity of 1500 counts is 1.5 units). Kinds without a single
    /// body-wide scale return `None`; ZGYRO carries two per-field scales
    /// documented on its body record.
    pub const fn unit_scale(self) -> Option<f32> {
        match self {
            MsgKind::Imu | MsgKind::Mag | MsgKind::Ahrs => Some(1.0),
            MsgKind::Odo | MsgKind::Ptz | MsgKind::CBus => Some(1e3),
            MsgKind::PidCalib | MsgKind::VelCalib | MsgKind::MecCalib | MsgKind::PosCalib => {
                Some(1e3)
            }
            _ => None,
        }
    }

    /// Bit index of this kind in a subscription filter
    ///
    /// VRC and VHC share index 5, as in the original wire table: the two
    /// kinds cannot be distinguished by a subscription filter. Known
    /// aliasing, preserved because deployed supervisors may rely on it.
    pub const fn filter_index(self) -> u8 {
        match self {
            MsgKind::Imu => 0,
            MsgKind::Mag => 1,
            MsgKind::Uwb => 2,
            MsgKind::Odo => 3,
            MsgKind::Ptz => 4,
            MsgKind::Vrc => 5,
            MsgKind::Vhc => 5,
            MsgKind::Ahrs => 6,
            MsgKind::CBus => 7,
            MsgKind::VDBus => 8,
            MsgKind::ZGyro => 9,
            MsgKind::Motor => 10,
            MsgKind::Statu => 11,
            MsgKind::Subsc => 12,
            MsgKind::Calib => 13,
            MsgKind::PidCalib => 14,
            MsgKind::ImuCalib => 15,
            MsgKind::MagCalib => 16,
            MsgKind::VelCalib => 17,
            MsgKind::MecCalib => 18,
            MsgKind::PosCalib => 19,
        }
    }

    /// Registry lookup by wire id
    pub fn from_id(id: u8) -> Option<MsgKind> {
        match id {
            0x01 => Some(MsgKind::Imu),
            0x02 => Some(MsgKind::Mag),
            0x03 => Some(MsgKind::Uwb),
            0x04 => Some(MsgKind::Odo),
            0x05 => Some(MsgKind::Ptz),
            0x06 => Some(MsgKind::Vrc),
            0x07 => Some(MsgKind::Vhc),
            0x08 => Some(MsgKind::Ahrs),
            0x09 => Some(MsgKind::CBus),
            0x0a => Some(MsgKind::VDBus),
            0x0b => Some(MsgKind::ZGyro),
            0x0c => Some(MsgKind::Motor),
            0x0d => Some(MsgKind::Statu),
            0x0e => Some(MsgKind::Subsc),
            0x0f => Some(MsgKind::Calib),
            0x10 => Some(MsgKind::PidCalib),
            0x11 => Some(MsgKind::ImuCalib),
            0x12 => Some(MsgKind::MagCalib),
            0x13 => Some(MsgKind::VelCalib),
            0x14 => Some(MsgKind::MecCalib),
            0x15 => Some(MsgKind::PosCalib),
            _ => None,
        }
    }

    /// Registry head for this kind
    pub const fn head(self) -> MsgHead {
        MsgHead {
            id: self.id(),
            length: self.body_len(),
            token: self.token(),
        }
    }
}

/// Set of message kinds, keyed by subscription filter index
///
/// Used as the SUBSC telemetry filter. Because VRC and VHC alias the
/// same filter bit, inserting one makes `contains` true for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSet(u32);

impl KindSet {
    /// Empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Reconstruct from a raw wire bitmask (SUBSC body field)
    pub const fn from_mask(mask: u32) -> Self {
        Self(mask)
    }

    /// Raw wire bitmask
    pub const fn mask(self) -> u32 {
        self.0
    }

    /// Add a kind to the set
    pub fn insert(&mut self, kind: MsgKind) {
        self.0 |= 1 << kind.filter_index();
    }

    /// Remove a kind from the set
    pub fn remove(&mut self, kind: MsgKind) {
        self.0 &= !(1 << kind.filter_index());
    }

    /// Membership test by filter bit
    pub const fn contains(self, kind: MsgKind) -> bool {
        self.0 & (1 << kind.filter_index()) != 0
    }

    /// True when no kind is subscribed
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let mut seen = HashSet::new();
        for kind in MsgKind::ALL {
            assert!(seen.insert(kind.id()), "id 0x{:02x} reused", kind.id());
        }
    }

    #[test]
    fn test_tokens_unique() {
        let mut seen = HashSet::new();
        for kind in MsgKind::ALL {
            assert!(
                seen.insert(kind.token()),
                "token 0x{:04x} reused",
                kind.token()
            );
        }
    }

    #[test]
    fn test_from_id_round_trip() {
        for kind in MsgKind::ALL {
            assert_eq!(MsgKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(MsgKind::from_id(0x00), None);
        assert_eq!(MsgKind::from_id(0x16), None);
        assert_eq!(MsgKind::from_id(0xff), None);
    }

    #[test]
    fn test_head_matches_registry() {
        let head = MsgKind::Odo.head();
        assert_eq!(head.id, 0x04);
        assert_eq!(head.length, 40);
        assert_eq!(head.token, 0xff14);
    }

    #[test]
    fn test_kind_set_membership() {
        let mut set = KindSet::empty();
        assert!(set.is_empty());

        set.insert(MsgKind::Odo);
        set.insert(MsgKind::Statu);
        assert!(set.contains(MsgKind::Odo));
        assert!(set.contains(MsgKind::Statu));
        assert!(!set.contains(MsgKind::Imu));

        set.remove(MsgKind::Odo);
        assert!(!set.contains(MsgKind::Odo));
    }

    #[test]
    fn test_vrc_vhc_share_filter_bit() {
        // Wire-table aliasing: subscribing to VRC also matches VHC
        let mut set = KindSet::empty();
        set.insert(MsgKind::Vrc);
        assert!(set.contains(MsgKind::Vhc));
        assert_eq!(set.mask(), 1 << 5);
    }

    #[test]
    fn test_mask_round_trip() {
        let mut set = KindSet::empty();
        set.insert(MsgKind::Odo);
        set.insert(MsgKind::ZGyro);
        let wire = set.mask();
        assert_eq!(KindSet::from_mask(wire), set);
    }
}
