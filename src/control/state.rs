//! Live control-state aggregator
//!
//! [`CtlState`] holds the snapshot the control cascade reads each tick:
//! chassis setpoint and measurements, gimbal setpoint and measurements,
//! and one previous-cycle snapshot per axis for derivative/slew use.
//! [`CtlState::apply`] routes decoded link messages into their slots,
//! copying current into previous before every overwrite. Only the
//! control scheduler mutates this state, once per tick per source, so
//! an apply is atomic with respect to the cascade.
//!
//! Calibration and subscription kinds never touch control state; they
//! land in side-channel fields the controller consumes separately.

use crate::msg::body::{
    CalibMsg, ImuMsg, MagMsg, MecCalibMsg, PidCalib, PosCalibMsg, UwbMsg,
    DBUS_FRAME_LEN, HCP_FRAME_LEN, RCP_FRAME_LEN,
};
use crate::msg::{KindSet, Msg};

/// Body-frame chassis velocity (m/s, m/s, rad/s)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisVel {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Per-wheel shaft rates (rad/s), wheel order FL FR RL RR
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelState {
    pub w: [f32; 4],
}

/// Per-wheel continuous shaft angles (rad)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelAngles {
    pub a: [f32; 4],
}

/// Gimbal pan/tilt pair (rad or rad/s depending on context)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GimbalState {
    pub pan: f32,
    pub tilt: f32,
}

/// Peripheral/functional status words mirrored into STATU telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriphsState {
    /// Watchdog heartbeat counter
    pub wdg: u32,
    /// Initialization flag word
    pub ini: u32,
}

/// Latest raw pass-through frames, kept for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawFrames {
    pub vrc: Option<[u8; RCP_FRAME_LEN]>,
    pub vhc: Option<[u8; HCP_FRAME_LEN]>,
    pub vdbus: Option<[u8; DBUS_FRAME_LEN]>,
}

/// Calibration payloads waiting for the controller to consume
#[derive(Debug, Clone, Default)]
pub struct PendingCalib {
    /// Auto-calibration flag bits (CALIB_FLAG_*)
    pub auto_flags: u32,
    pub pid: Vec<PidCalib>,
    pub mec: Option<MecCalibMsg>,
    pub pos: Option<PosCalibMsg>,
    pub vel: Option<(f32, f32, f32)>,
    pub imu_offset: Option<ImuMsg>,
    pub mag_offset: Option<MagMsg>,
}

/// The live control snapshot consumed by the cascade
#[derive(Debug, Clone, Default)]
pub struct CtlState {
    /// Peripheral status words
    pub fs: PeriphsState,
    /// Functional-state command word from the last CBUS
    pub fs_cmd: u32,

    /// Chassis velocity setpoint (from CBUS)
    pub cv: ChassisVel,
    /// Chassis velocity measured (from ODO)
    pub cm: ChassisVel,
    /// Chassis pose measured (from ODO)
    pub cp: ChassisVel,
    /// Wheel rates measured (from MOTOR)
    pub mv: WheelState,
    /// Wheel rates commanded (cascade output, last tick)
    pub mc: WheelState,
    /// Wheel rates measured, previous cycle
    pub mp: WheelState,
    /// Wheel continuous angles measured (from MOTOR)
    pub ma: WheelAngles,

    /// Gimbal position measured (from PTZ/ODO)
    pub gv: GimbalState,
    /// Gimbal position measured, previous cycle
    pub gp_prev: GimbalState,
    /// Gimbal rates measured (from ODO), once any have arrived
    pub gr: Option<GimbalState>,
    /// Gimbal position setpoint (from CBUS)
    pub gc: GimbalState,

    /// Latest yaw gyro reading (deg, deg/s), if any has arrived
    pub yaw: Option<(f32, f32)>,
    /// Latest IMU sample, offsets applied
    pub imu: Option<ImuMsg>,
    /// Latest magnetometer sample, offsets applied
    pub mag: Option<MagMsg>,
    /// Latest attitude quaternion
    pub quat: Option<[f32; 4]>,
    /// Latest valid UWB fix
    pub uwb: Option<UwbMsg>,

    /// Raw pass-through frames
    pub raw: RawFrames,
    /// Telemetry kinds the supervisor subscribed to
    pub subscriptions: KindSet,
    /// Calibration side-channel
    pub calib: PendingCalib,
    /// Last status report received from the peer
    pub peer_status: Option<(u32, u32)>,
}

impl CtlState {
    /// Zero every snapshot and side-channel
    pub fn reset(&mut self) {
        *self = CtlState::default();
    }

    /// Route one decoded message into its slot
    ///
    /// Returns `true` when the message refreshed sensor state (the
    /// watchdog treats those as proof of a live feed). Command and
    /// side-channel kinds return `false`; unrecognized-for-control
    /// kinds are accepted and ignored.
    pub fn apply(&mut self, msg: &Msg) -> bool {
        match msg {
            Msg::Imu(m) => {
                let off = self.calib.imu_offset.unwrap_or_default();
                self.imu = Some(ImuMsg {
                    frame_id: m.frame_id,
                    ax: m.ax.wrapping_sub(off.ax),
                    ay: m.ay.wrapping_sub(off.ay),
                    az: m.az.wrapping_sub(off.az),
                    gx: m.gx.wrapping_sub(off.gx),
                    gy: m.gy.wrapping_sub(off.gy),
                    gz: m.gz.wrapping_sub(off.gz),
                });
                true
            }
            Msg::Mag(m) => {
                let off = self.calib.mag_offset.unwrap_or_default();
                self.mag = Some(MagMsg {
                    frame_id: m.frame_id,
                    mx: m.mx.wrapping_sub(off.mx),
                    my: m.my.wrapping_sub(off.my),
                    mz: m.mz.wrapping_sub(off.mz),
                });
                true
            }
            Msg::Uwb(m) => {
                if m.is_valid() {
                    self.uwb = Some(*m);
                }
                true
            }
            Msg::Odo(m) => {
                let (vx, vy, vz) = m.velocity();
                self.cm = ChassisVel {
                    x: vx,
                    y: vy,
                    z: vz,
                };
                let (px, py, pz) = m.pose();
                self.cp = ChassisVel {
                    x: px,
                    y: py,
                    z: pz,
                };
                let (pan, tilt) = m.gimbal_position();
                self.gp_prev = self.gv;
                self.gv = GimbalState { pan, tilt };
                let (rp, rt) = m.gimbal_rate();
                self.gr = Some(GimbalState { pan: rp, tilt: rt });
                true
            }
            Msg::Ptz(m) => {
                let (pan, tilt) = m.pan_tilt();
                self.gp_prev = self.gv;
                self.gv = GimbalState { pan, tilt };
                true
            }
            Msg::Ahrs(m) => {
                self.quat = Some(m.q);
                true
            }
            Msg::ZGyro(m) => {
                self.yaw = Some((m.angle_deg(), m.rate_dps()));
                true
            }
            Msg::Motor(m) => {
                let idx = m.id as usize;
                if idx < 4 {
                    self.mp = self.mv;
                    self.mv.w[idx] = m.rate_rad_s();
                    self.ma.a[idx] = m.angle_rad();
                } else {
                    log::trace!("motor {} outside the chassis bank, ignored", m.id);
                }
                true
            }
            Msg::CBus(m) => {
                self.fs_cmd = m.fs;
                let (vx, vy, wz) = m.chassis_setpoint();
                self.cv = ChassisVel {
                    x: vx,
                    y: vy,
                    z: wz,
                };
                let (pan, tilt) = m.gimbal_setpoint();
                self.gc = GimbalState { pan, tilt };
                false
            }
            Msg::Vrc(m) => {
                self.raw.vrc = Some(m.data);
                false
            }
            Msg::Vhc(m) => {
                self.raw.vhc = Some(m.data);
                false
            }
            Msg::VDBus(m) => {
                self.raw.vdbus = Some(m.data);
                false
            }
            Msg::Statu(m) => {
                self.peer_status = Some((m.wdg, m.ini));
                false
            }
            Msg::Subsc(m) => {
                self.subscriptions = KindSet::from_mask(m.msg_type);
                log::info!("telemetry subscription mask set to 0x{:08x}", m.msg_type);
                false
            }
            Msg::Calib(CalibMsg { auto_cali_flag, .. }) => {
                self.calib.auto_flags |= auto_cali_flag;
                false
            }
            Msg::PidCalib(m) => {
                self.calib.pid.push(m.data);
                false
            }
            Msg::ImuCalib(m) => {
                self.calib.imu_offset = Some(ImuMsg {
                    frame_id: m.frame_id,
                    ax: m.ax,
                    ay: m.ay,
                    az: m.az,
                    gx: m.gx,
                    gy: m.gy,
                    gz: m.gz,
                });
                false
            }
            Msg::MagCalib(m) => {
                self.calib.mag_offset = Some(MagMsg {
                    frame_id: m.frame_id,
                    mx: m.mx,
                    my: m.my,
                    mz: m.mz,
                });
                false
            }
            Msg::VelCalib(m) => {
                self.calib.vel = Some(m.factors());
                false
            }
            Msg::MecCalib(m) => {
                self.calib.mec = Some(*m);
                false
            }
            Msg::PosCalib(m) => {
                self.calib.pos = Some(*m);
                false
            }
        }
    }
}
