//! Fixed-layout message body records
//!
//! One record per registry kind, with byte-exact little-endian field
//! layouts. Every record leads with its `frame_id` sequence counter
//! (MOTOR leads with the motor index, then its counter). Layouts are
//! defined field-by-field here; there is no host-dependent padding, and
//! each record's `WIRE_LEN` is pinned against the registry by tests.
//!
//! Scale conventions: kinds with a body-wide unit scale store
//! `physical * scale` as integers; consumers divide by the scale to
//! recover physical units. ZGYRO instead carries two per-field
//! multipliers ([`ZGYRO_ANGLE_RECIP`], [`ZGYRO_RATE_RECIP`]).

use super::kind::MsgKind;

/// ODO integer fields are physical units times this
pub const ODO_VALUE_SCALE: f32 = 1e3;
/// PTZ integer fields are physical units times this
pub const PTZ_VALUE_SCALE: f32 = 1e3;
/// CBUS setpoint fields are physical units times this
pub const CBUS_VALUE_SCALE: f32 = 1e3;
/// Multiply a raw ZGYRO angle by this to get degrees
pub const ZGYRO_ANGLE_RECIP: f32 = 1e-2;
/// Multiply a raw ZGYRO rate by this to get degrees per second
pub const ZGYRO_RATE_RECIP: f32 = 1e-5;
/// Calibration payload fields are physical units times this
pub const CALIB_VALUE_SCALE: f32 = 1e3;

/// Raw remote-control frame length
pub const RCP_FRAME_LEN: usize = 18;
/// Raw host-control frame length
pub const HCP_FRAME_LEN: usize = 20;
/// Raw digital-bus frame length
pub const DBUS_FRAME_LEN: usize = 18;

/// Motor encoder angle wraps at this count
pub const MOTOR_ECD_ANGLE_MAX: u16 = 8191;
/// Number of addressable motors on the bus
pub const MOTOR_COUNT: usize = 6;

/// CALIB flag bit: auto-calibrate IMU offsets
pub const CALIB_FLAG_IMU: u32 = 1 << 0;
/// CALIB flag bit: auto-calibrate magnetometer offsets
pub const CALIB_FLAG_MAG: u32 = 1 << 1;
/// CALIB flag bit: auto-calibrate gimbal position travel
pub const CALIB_FLAG_POS: u32 = 1 << 2;

// Little-endian field cursors. Offsets are sequential by construction,
// so a record's layout reads top to bottom in its encode/decode pair.
struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }
    fn u8(&mut self, v: u8) {
        self.buf[self.pos] = v;
        self.pos += 1;
    }
    fn u16(&mut self, v: u16) {
        self.buf[self.pos..self.pos + 2].copy_from_slice(&v.to_le_bytes());
        self.pos += 2;
    }
    fn i16(&mut self, v: i16) {
        self.buf[self.pos..self.pos + 2].copy_from_slice(&v.to_le_bytes());
        self.pos += 2;
    }
    fn u32(&mut self, v: u32) {
        self.buf[self.pos..self.pos + 4].copy_from_slice(&v.to_le_bytes());
        self.pos += 4;
    }
    fn i32(&mut self, v: i32) {
        self.buf[self.pos..self.pos + 4].copy_from_slice(&v.to_le_bytes());
        self.pos += 4;
    }
    fn f32(&mut self, v: f32) {
        self.buf[self.pos..self.pos + 4].copy_from_slice(&v.to_le_bytes());
        self.pos += 4;
    }
    fn bytes(&mut self, v: &[u8]) {
        self.buf[self.pos..self.pos + v.len()].copy_from_slice(v);
        self.pos += v.len();
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
    fn u8(&mut self) -> u8 {
        let v = self.buf[self.pos];
        self.pos += 1;
        v
    }
    fn u16(&mut self) -> u16 {
        let v = u16::from_le_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        v
    }
    fn i16(&mut self) -> i16 {
        self.u16() as i16
    }
    fn u32(&mut self) -> u32 {
        let v = u32::from_le_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]);
        self.pos += 4;
        v
    }
    fn i32(&mut self) -> i32 {
        self.u32() as i32
    }
    fn f32(&mut self) -> f32 {
        f32::from_bits(self.u32())
    }
    fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }
}

/// Raw IMU sample: accelerometer and gyro counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImuMsg {
    pub frame_id: u32,
    pub ax: i16,
    pub ay: i16,
    pub az: i16,
    pub gx: i16,
    pub gy: i16,
    pub gz: i16,
}

impl ImuMsg {
    pub const WIRE_LEN: usize = 16;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i16(self.ax);
        w.i16(self.ay);
        w.i16(self.az);
        w.i16(self.gx);
        w.i16(self.gy);
        w.i16(self.gz);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            ax: r.i16(),
            ay: r.i16(),
            az: r.i16(),
            gx: r.i16(),
            gy: r.i16(),
            gz: r.i16(),
        }
    }
}

/// Magnetometer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MagMsg {
    pub frame_id: u32,
    pub mx: i16,
    pub my: i16,
    pub mz: i16,
}

impl MagMsg {
    pub const WIRE_LEN: usize = 10;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i16(self.mx);
        w.i16(self.my);
        w.i16(self.mz);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            mx: r.i16(),
            my: r.i16(),
            mz: r.i16(),
        }
    }
}

/// UWB position fix; `flag` 0 marks an invalid fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UwbMsg {
    pub frame_id: u32,
    pub flag: u8,
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub w: u32,
}

impl UwbMsg {
    pub const WIRE_LEN: usize = 21;

    pub fn is_valid(&self) -> bool {
        self.flag == 1
    }

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u8(self.flag);
        w.u32(self.x);
        w.u32(self.y);
        w.u32(self.z);
        w.u32(self.w);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            flag: r.u8(),
            x: r.u32(),
            y: r.u32(),
            z: r.u32(),
            w: r.u32(),
        }
    }
}

/// Chassis triple in scaled counts: x, y translation and z rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChassisCounts {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Gimbal pair in scaled counts: pan and tilt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GimbalCounts {
    pub p: i16,
    pub t: i16,
}

/// Odometry snapshot: chassis pose `cp` and velocity `cv`, gimbal
/// position `gp` and rate `gv`, plus the functional-state word
///
/// All counts are physical units times [`ODO_VALUE_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OdoMsg {
    pub frame_id: u32,
    pub fs: u32,
    pub cp: ChassisCounts,
    pub cv: ChassisCounts,
    pub gp: GimbalCounts,
    pub gv: GimbalCounts,
}

impl OdoMsg {
    pub const WIRE_LEN: usize = 40;

    /// Chassis velocity in physical units
    pub fn velocity(&self) -> (f32, f32, f32) {
        (
            self.cv.x as f32 / ODO_VALUE_SCALE,
            self.cv.y as f32 / ODO_VALUE_SCALE,
            self.cv.z as f32 / ODO_VALUE_SCALE,
        )
    }

    /// Chassis pose in physical units
    pub fn pose(&self) -> (f32, f32, f32) {
        (
            self.cp.x as f32 / ODO_VALUE_SCALE,
            self.cp.y as f32 / ODO_VALUE_SCALE,
            self.cp.z as f32 / ODO_VALUE_SCALE,
        )
    }

    /// Gimbal position in physical units
    pub fn gimbal_position(&self) -> (f32, f32) {
        (
            self.gp.p as f32 / ODO_VALUE_SCALE,
            self.gp.t as f32 / ODO_VALUE_SCALE,
        )
    }

    /// Gimbal rates in physical units
    pub fn gimbal_rate(&self) -> (f32, f32) {
        (
            self.gv.p as f32 / ODO_VALUE_SCALE,
            self.gv.t as f32 / ODO_VALUE_SCALE,
        )
    }

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u32(self.fs);
        w.i32(self.cp.x);
        w.i32(self.cp.y);
        w.i32(self.cp.z);
        w.i32(self.cv.x);
        w.i32(self.cv.y);
        w.i32(self.cv.z);
        w.i16(self.gp.p);
        w.i16(self.gp.t);
        w.i16(self.gv.p);
        w.i16(self.gv.t);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            fs: r.u32(),
            cp: ChassisCounts {
                x: r.i32(),
                y: r.i32(),
                z: r.i32(),
            },
            cv: ChassisCounts {
                x: r.i32(),
                y: r.i32(),
                z: r.i32(),
            },
            gp: GimbalCounts {
                p: r.i16(),
                t: r.i16(),
            },
            gv: GimbalCounts {
                p: r.i16(),
                t: r.i16(),
            },
        }
    }
}

/// Pan-tilt-zoom measurement, units times [`PTZ_VALUE_SCALE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PtzMsg {
    pub frame_id: u32,
    pub p: i16,
    pub t: i16,
    pub z: i16,
}

impl PtzMsg {
    pub const WIRE_LEN: usize = 10;

    /// Pan/tilt in physical units
    pub fn pan_tilt(&self) -> (f32, f32) {
        (
            self.p as f32 / PTZ_VALUE_SCALE,
            self.t as f32 / PTZ_VALUE_SCALE,
        )
    }

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i16(self.p);
        w.i16(self.t);
        w.i16(self.z);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            p: r.i16(),
            t: r.i16(),
            z: r.i16(),
        }
    }
}

/// Raw remote-control frame, passed through opaquely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VrcMsg {
    pub frame_id: u32,
    pub data: [u8; RCP_FRAME_LEN],
}

impl VrcMsg {
    pub const WIRE_LEN: usize = 4 + RCP_FRAME_LEN;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.bytes(&self.data);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            data: r.bytes(),
        }
    }
}

/// Raw host-control frame, passed through opaquely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VhcMsg {
    pub frame_id: u32,
    pub data: [u8; HCP_FRAME_LEN],
}

impl VhcMsg {
    pub const WIRE_LEN: usize = 4 + HCP_FRAME_LEN;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.bytes(&self.data);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            data: r.bytes(),
        }
    }
}

/// Attitude quaternion (w, x, y, z)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AhrsMsg {
    pub frame_id: u32,
    pub q: [f32; 4],
}

impl AhrsMsg {
    pub const WIRE_LEN: usize = 20;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        for &q in &self.q {
            w.f32(q);
        }
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            q: [r.f32(), r.f32(), r.f32(), r.f32()],
        }
    }
}

/// Chassis setpoint triple in scaled counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChassisCmd {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Control-bus command: functional state plus chassis velocity and
/// gimbal position setpoints, units times [`CBUS_VALUE_SCALE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CBusMsg {
    pub frame_id: u32,
    pub fs: u32,
    pub cv: ChassisCmd,
    pub gv: GimbalCounts,
}

impl CBusMsg {
    pub const WIRE_LEN: usize = 18;

    /// Chassis velocity setpoint in physical units
    pub fn chassis_setpoint(&self) -> (f32, f32, f32) {
        (
            self.cv.x as f32 / CBUS_VALUE_SCALE,
            self.cv.y as f32 / CBUS_VALUE_SCALE,
            self.cv.z as f32 / CBUS_VALUE_SCALE,
        )
    }

    /// Gimbal position setpoint in physical units
    pub fn gimbal_setpoint(&self) -> (f32, f32) {
        (
            self.gv.p as f32 / CBUS_VALUE_SCALE,
            self.gv.t as f32 / CBUS_VALUE_SCALE,
        )
    }

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u32(self.fs);
        w.i16(self.cv.x);
        w.i16(self.cv.y);
        w.i16(self.cv.z);
        w.i16(self.gv.p);
        w.i16(self.gv.t);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            fs: r.u32(),
            cv: ChassisCmd {
                x: r.i16(),
                y: r.i16(),
                z: r.i16(),
            },
            gv: GimbalCounts {
                p: r.i16(),
                t: r.i16(),
            },
        }
    }
}

/// Raw digital-bus frame, passed through opaquely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VDBusMsg {
    pub frame_id: u32,
    pub data: [u8; DBUS_FRAME_LEN],
}

impl VDBusMsg {
    pub const WIRE_LEN: usize = 4 + DBUS_FRAME_LEN;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.bytes(&self.data);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            data: r.bytes(),
        }
    }
}

/// Single-axis yaw gyro: `angle` is degrees times 100, `rate` is
/// degrees per second times 1e5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZGyroMsg {
    pub frame_id: u32,
    pub angle: i32,
    pub rate: i16,
}

impl ZGyroMsg {
    pub const WIRE_LEN: usize = 10;

    /// Yaw angle in degrees
    pub fn angle_deg(&self) -> f32 {
        self.angle as f32 * ZGYRO_ANGLE_RECIP
    }

    /// Yaw rate in degrees per second
    pub fn rate_dps(&self) -> f32 {
        self.rate as f32 * ZGYRO_RATE_RECIP
    }

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i32(self.angle);
        w.i16(self.rate);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            angle: r.i32(),
            rate: r.i16(),
        }
    }
}

/// Per-motor encoder state
///
/// `ecd_angle` wraps at [`MOTOR_ECD_ANGLE_MAX`]; `round` counts the
/// wraps and `angle` is the continuous (unbounded) count. `rate` is the
/// encoder delta per millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorMsg {
    pub id: u8,
    pub frame_id: u32,
    pub ecd_angle: u16,
    pub round: i32,
    pub angle: i32,
    pub rate: i16,
}

impl MotorMsg {
    pub const WIRE_LEN: usize = 17;

    /// Shaft rate in revolutions per second
    pub fn rate_rps(&self) -> f32 {
        self.rate as f32 * 1e3 / (MOTOR_ECD_ANGLE_MAX as f32 + 1.0)
    }

    /// Shaft rate in radians per second
    pub fn rate_rad_s(&self) -> f32 {
        self.rate_rps() * std::f32::consts::TAU
    }

    /// Continuous shaft angle in radians
    pub fn angle_rad(&self) -> f32 {
        self.angle as f32 / (MOTOR_ECD_ANGLE_MAX as f32 + 1.0) * std::f32::consts::TAU
    }

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u8(self.id);
        w.u32(self.frame_id);
        w.u16(self.ecd_angle);
        w.i32(self.round);
        w.i32(self.angle);
        w.i16(self.rate);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            id: r.u8(),
            frame_id: r.u32(),
            ecd_angle: r.u16(),
            round: r.i32(),
            angle: r.i32(),
            rate: r.i16(),
        }
    }
}

/// Status / watchdog report: heartbeat counter and init flag word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatuMsg {
    pub frame_id: u32,
    pub wdg: u32,
    pub ini: u32,
}

impl StatuMsg {
    pub const WIRE_LEN: usize = 12;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u32(self.wdg);
        w.u32(self.ini);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            wdg: r.u32(),
            ini: r.u32(),
        }
    }
}

/// Telemetry subscription request carrying a [`super::KindSet`] mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubscMsg {
    pub frame_id: u32,
    pub msg_type: u32,
}

impl SubscMsg {
    pub const WIRE_LEN: usize = 8;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u32(self.msg_type);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            msg_type: r.u32(),
        }
    }
}

/// Auto-calibration control flags (`CALIB_FLAG_*` bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalibMsg {
    pub frame_id: u32,
    pub auto_cali_flag: u32,
}

impl CalibMsg {
    pub const WIRE_LEN: usize = 8;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u32(self.auto_cali_flag);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            auto_cali_flag: r.u32(),
        }
    }
}

/// PID gain block addressed at one control loop bank
///
/// Gains and limits are physical values times [`CALIB_VALUE_SCALE`].
/// `loop_id`: 0 wheel velocity, 1 wheel position hold, 2 chassis body,
/// 3 gimbal position, 4 gimbal rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PidCalib {
    pub loop_id: u8,
    pub kp: u16,
    pub ki: u16,
    pub kd: u16,
    pub it: u16,
    pub pmax: u16,
    pub imax: u16,
    pub dmax: u16,
    pub omax: u16,
}

/// PID calibration payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PidCalibMsg {
    pub frame_id: u32,
    pub data: PidCalib,
}

impl PidCalibMsg {
    pub const WIRE_LEN: usize = 21;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u8(self.data.loop_id);
        w.u16(self.data.kp);
        w.u16(self.data.ki);
        w.u16(self.data.kd);
        w.u16(self.data.it);
        w.u16(self.data.pmax);
        w.u16(self.data.imax);
        w.u16(self.data.dmax);
        w.u16(self.data.omax);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            data: PidCalib {
                loop_id: r.u8(),
                kp: r.u16(),
                ki: r.u16(),
                kd: r.u16(),
                it: r.u16(),
                pmax: r.u16(),
                imax: r.u16(),
                dmax: r.u16(),
                omax: r.u16(),
            },
        }
    }
}

/// IMU offset calibration: accel and gyro zero offsets in counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImuCalibMsg {
    pub frame_id: u32,
    pub ax: i16,
    pub ay: i16,
    pub az: i16,
    pub gx: i16,
    pub gy: i16,
    pub gz: i16,
}

impl ImuCalibMsg {
    pub const WIRE_LEN: usize = 16;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i16(self.ax);
        w.i16(self.ay);
        w.i16(self.az);
        w.i16(self.gx);
        w.i16(self.gy);
        w.i16(self.gz);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            ax: r.i16(),
            ay: r.i16(),
            az: r.i16(),
            gx: r.i16(),
            gy: r.i16(),
            gz: r.i16(),
        }
    }
}

/// Magnetometer offset calibration in counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MagCalibMsg {
    pub frame_id: u32,
    pub mx: i16,
    pub my: i16,
    pub mz: i16,
}

impl MagCalibMsg {
    pub const WIRE_LEN: usize = 10;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i16(self.mx);
        w.i16(self.my);
        w.i16(self.mz);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            mx: r.i16(),
            my: r.i16(),
            mz: r.i16(),
        }
    }
}

/// Velocity scale calibration, per chassis axis, times
/// [`CALIB_VALUE_SCALE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VelCalibMsg {
    pub frame_id: u32,
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl VelCalibMsg {
    pub const WIRE_LEN: usize = 10;

    /// Per-axis multipliers in physical units
    pub fn factors(&self) -> (f32, f32, f32) {
        (
            self.x as f32 / CALIB_VALUE_SCALE,
            self.y as f32 / CALIB_VALUE_SCALE,
            self.z as f32 / CALIB_VALUE_SCALE,
        )
    }

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i16(self.x);
        w.i16(self.y);
        w.i16(self.z);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            x: r.i16(),
            y: r.i16(),
            z: r.i16(),
        }
    }
}

/// Mecanum geometry calibration: half wheelbase `lx`, half track `ly`,
/// wheel radii `r1`/`r2`, meters times [`CALIB_VALUE_SCALE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MecCalibMsg {
    pub frame_id: u32,
    pub lx: u16,
    pub ly: u16,
    pub r1: u16,
    pub r2: u16,
}

impl MecCalibMsg {
    pub const WIRE_LEN: usize = 12;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.u16(self.lx);
        w.u16(self.ly);
        w.u16(self.r1);
        w.u16(self.r2);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            lx: r.u16(),
            ly: r.u16(),
            r1: r.u16(),
            r2: r.u16(),
        }
    }
}

/// Gimbal travel calibration: pan/tilt limits, radians times
/// [`CALIB_VALUE_SCALE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PosCalibMsg {
    pub frame_id: u32,
    pub p_min: i16,
    pub p_max: i16,
    pub t_min: i16,
    pub t_max: i16,
}

impl PosCalibMsg {
    pub const WIRE_LEN: usize = 12;

    pub fn encode(&self, out: &mut [u8]) {
        let mut w = Writer::new(out);
        w.u32(self.frame_id);
        w.i16(self.p_min);
        w.i16(self.p_max);
        w.i16(self.t_min);
        w.i16(self.t_max);
    }

    pub fn decode(buf: &[u8]) -> Self {
        let mut r = Reader::new(buf);
        Self {
            frame_id: r.u32(),
            p_min: r.i16(),
            p_max: r.i16(),
            t_min: r.i16(),
            t_max: r.i16(),
        }
    }
}

/// A decoded message: one variant per registry kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Msg {
    Imu(ImuMsg),
    Mag(MagMsg),
    Uwb(UwbMsg),
    Odo(OdoMsg),
    Ptz(PtzMsg),
    Vrc(VrcMsg),
    Vhc(VhcMsg),
    Ahrs(AhrsMsg),
    CBus(CBusMsg),
    VDBus(VDBusMsg),
    ZGyro(ZGyroMsg),
    Motor(MotorMsg),
    Statu(StatuMsg),
    Subsc(SubscMsg),
    Calib(CalibMsg),
    PidCalib(PidCalibMsg),
    ImuCalib(ImuCalibMsg),
    MagCalib(MagCalibMsg),
    VelCalib(VelCalibMsg),
    MecCalib(MecCalibMsg),
    PosCalib(PosCalibMsg),
}

impl Msg {
    /// Registry kind of this message
    pub const fn kind(&self) -> MsgKind {
        match self {
            Msg::Imu(_) => MsgKind::Imu,
            Msg::Mag(_) => MsgKind::Mag,
            Msg::Uwb(_) => MsgKind::Uwb,
            Msg::Odo(_) => MsgKind::Odo,
            Msg::Ptz(_) => MsgKind::Ptz,
            Msg::Vrc(_) => MsgKind::Vrc,
            Msg::Vhc(_) => MsgKind::Vhc,
            Msg::Ahrs(_) => MsgKind::Ahrs,
            Msg::CBus(_) => MsgKind::CBus,
            Msg::VDBus(_) => MsgKind::VDBus,
            Msg::ZGyro(_) => MsgKind::ZGyro,
            Msg::Motor(_) => MsgKind::Motor,
            Msg::Statu(_) => MsgKind::Statu,
            Msg::Subsc(_) => MsgKind::Subsc,
            Msg::Calib(_) => MsgKind::Calib,
            Msg::PidCalib(_) => MsgKind::PidCalib,
            Msg::ImuCalib(_) => MsgKind::ImuCalib,
            Msg::MagCalib(_) => MsgKind::MagCalib,
            Msg::VelCalib(_) => MsgKind::VelCalib,
            Msg::MecCalib(_) => MsgKind::MecCalib,
            Msg::PosCalib(_) => MsgKind::PosCalib,
        }
    }

    /// Per-kind monotonic sequence counter
    pub const fn frame_id(&self) -> u32 {
        match self {
            Msg::Imu(m) => m.frame_id,
            Msg::Mag(m) => m.frame_id,
            Msg::Uwb(m) => m.frame_id,
            Msg::Odo(m) => m.frame_id,
            Msg::Ptz(m) => m.frame_id,
            Msg::Vrc(m) => m.frame_id,
            Msg::Vhc(m) => m.frame_id,
            Msg::Ahrs(m) => m.frame_id,
            Msg::CBus(m) => m.frame_id,
            Msg::VDBus(m) => m.frame_id,
            Msg::ZGyro(m) => m.frame_id,
            Msg::Motor(m) => m.frame_id,
            Msg::Statu(m) => m.frame_id,
            Msg::Subsc(m) => m.frame_id,
            Msg::Calib(m) => m.frame_id,
            Msg::PidCalib(m) => m.frame_id,
            Msg::ImuCalib(m) => m.frame_id,
            Msg::MagCalib(m) => m.frame_id,
            Msg::VelCalib(m) => m.frame_id,
            Msg::MecCalib(m) => m.frame_id,
            Msg::PosCalib(m) => m.frame_id,
        }
    }

    /// Serialize the body into `out`, which must be exactly the
    /// registry body length for this kind
    pub fn encode_body(&self, out: &mut [u8]) {
        match self {
            Msg::Imu(m) => m.encode(out),
            Msg::Mag(m) => m.encode(out),
            Msg::Uwb(m) => m.encode(out),
            Msg::Odo(m) => m.encode(out),
            Msg::Ptz(m) => m.encode(out),
            Msg::Vrc(m) => m.encode(out),
            Msg::Vhc(m) => m.encode(out),
            Msg::Ahrs(m) => m.encode(out),
            Msg::CBus(m) => m.encode(out),
            Msg::VDBus(m) => m.encode(out),
            Msg::ZGyro(m) => m.encode(out),
            Msg::Motor(m) => m.encode(out),
            Msg::Statu(m) => m.encode(out),
            Msg::Subsc(m) => m.encode(out),
            Msg::Calib(m) => m.encode(out),
            Msg::PidCalib(m) => m.encode(out),
            Msg::ImuCalib(m) => m.encode(out),
            Msg::MagCalib(m) => m.encode(out),
            Msg::VelCalib(m) => m.encode(out),
            Msg::MecCalib(m) => m.encode(out),
            Msg::PosCalib(m) => m.encode(out),
        }
    }

    /// Parse a body of the given kind; `buf` must be exactly the
    /// registry body length
    pub fn decode_body(kind: MsgKind, buf: &[u8]) -> Msg {
        match kind {
            MsgKind::Imu => Msg::Imu(ImuMsg::decode(buf)),
            MsgKind::Mag => Msg::Mag(MagMsg::decode(buf)),
            MsgKind::Uwb => Msg::Uwb(UwbMsg::decode(buf)),
            MsgKind::Odo => Msg::Odo(OdoMsg::decode(buf)),
            MsgKind::Ptz => Msg::Ptz(PtzMsg::decode(buf)),
            MsgKind::Vrc => Msg::Vrc(VrcMsg::decode(buf)),
            MsgKind::Vhc => Msg::Vhc(VhcMsg::decode(buf)),
            MsgKind::Ahrs => Msg::Ahrs(AhrsMsg::decode(buf)),
            MsgKind::CBus => Msg::CBus(CBusMsg::decode(buf)),
            MsgKind::VDBus => Msg::VDBus(VDBusMsg::decode(buf)),
            MsgKind::ZGyro => Msg::ZGyro(ZGyroMsg::decode(buf)),
            MsgKind::Motor => Msg::Motor(MotorMsg::decode(buf)),
            MsgKind::Statu => Msg::Statu(StatuMsg::decode(buf)),
            MsgKind::Subsc => Msg::Subsc(SubscMsg::decode(buf)),
            MsgKind::Calib => Msg::Calib(CalibMsg::decode(buf)),
            MsgKind::PidCalib => Msg::PidCalib(PidCalibMsg::decode(buf)),
            MsgKind::ImuCalib => Msg::ImuCalib(ImuCalibMsg::decode(buf)),
            MsgKind::MagCalib => Msg::MagCalib(MagCalibMsg::decode(buf)),
            MsgKind::VelCalib => Msg::VelCalib(VelCalibMsg::decode(buf)),
            MsgKind::MecCalib => Msg::MecCalib(MecCalibMsg::decode(buf)),
            MsgKind::PosCalib => Msg::PosCalib(PosCalibMsg::decode(buf)),
        }
    }

    /// A zero-valued body of the given kind
    pub fn default_of(kind: MsgKind) -> Msg {
        match kind {
            MsgKind::Imu => Msg::Imu(ImuMsg::default()),
            MsgKind::Mag => Msg::Mag(MagMsg::default()),
            MsgKind::Uwb => Msg::Uwb(UwbMsg::default()),
            MsgKind::Odo => Msg::Odo(OdoMsg::default()),
            MsgKind::Ptz => Msg::Ptz(PtzMsg::default()),
            MsgKind::Vrc => Msg::Vrc(VrcMsg::default()),
            MsgKind::Vhc => Msg::Vhc(VhcMsg::default()),
            MsgKind::Ahrs => Msg::Ahrs(AhrsMsg::default()),
            MsgKind::CBus => Msg::CBus(CBusMsg::default()),
            MsgKind::VDBus => Msg::VDBus(VDBusMsg::default()),
            MsgKind::ZGyro => Msg::ZGyro(ZGyroMsg::default()),
            MsgKind::Motor => Msg::Motor(MotorMsg::default()),
            MsgKind::Statu => Msg::Statu(StatuMsg::default()),
            MsgKind::Subsc => Msg::Subsc(SubscMsg::default()),
            MsgKind::Calib => Msg::Calib(CalibMsg::default()),
            MsgKind::PidCalib => Msg::PidCalib(PidCalibMsg::default()),
            MsgKind::ImuCalib => Msg::ImuCalib(ImuCalibMsg::default()),
            MsgKind::MagCalib => Msg::MagCalib(MagCalibMsg::default()),
            MsgKind::VelCalib => Msg::VelCalib(VelCalibMsg::default()),
            MsgKind::MecCalib => Msg::MecCalib(MecCalibMsg::default()),
            MsgKind::PosCalib => Msg::PosCalib(PosCalibMsg::default()),
        }
    }
}
