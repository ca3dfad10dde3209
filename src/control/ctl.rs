//! Controller context and the per-tick control cascade
//!
//! [`Controller`] owns the whole control pipeline: the live state
//! snapshot, the PID banks, the setpoint ramps, and the kinematics
//! geometry. Everything is explicit context passed by `&mut`; there are
//! no globals and no interior mutability.
//!
//! The phase machine is Uninitialized -> Ready -> Running -> Faulted.
//! A feed that goes stale for more than [`ERR_TSK_TMS`] faults the
//! controller: outputs are forced to zero every tick until an external
//! [`Controller::init`]. There is no automatic recovery.

use super::mecanum::MecanumGeometry;
use super::pid::{DerivativeMode, Pid, PidGains};
use super::ramp::ChassisRamp;
use super::state::{CtlState, WheelAngles};
use crate::config::ControlConfig;
use crate::msg::body::{
    PidCalib, StatuMsg, CALIB_FLAG_IMU, CALIB_FLAG_MAG, CALIB_FLAG_POS, CALIB_VALUE_SCALE,
};
use crate::msg::Msg;

/// Feed staleness limit (ms); beyond this the controller faults
pub const ERR_TSK_TMS: f32 = 100.0;

/// Functional-state bit: chassis loops enabled
pub const FS_CHASSIS_EN: u32 = 1 << 0;
/// Functional-state bit: gimbal loops enabled
pub const FS_GIMBAL_EN: u32 = 1 << 1;
/// Functional-state bit: wheel position hold engaged
pub const FS_HOLD: u32 = 1 << 2;

/// Controller life-cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Construction complete, init not yet run
    Uninitialized,
    /// Init done, no tick processed yet
    Ready,
    /// Ticking with a live feed
    Running,
    /// Stale feed; outputs zeroed until re-init
    Faulted,
}

/// One tick's worth of actuator output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActuatorCommand {
    /// Wheel rate commands (rad/s), order FL FR RL RR
    pub wheels: [f32; 4],
    /// Gimbal pan drive
    pub pan: f32,
    /// Gimbal tilt drive
    pub tilt: f32,
}

/// Sink for actuator commands; the hardware link implements this
pub trait Actuators {
    fn dispatch(&mut self, cmd: &ActuatorCommand);
}

/// Gimbal PID pair, one instance per axis
#[derive(Debug, Clone, Copy)]
struct GimbalPids {
    p: Pid,
    t: Pid,
}

impl GimbalPids {
    fn new(gains: PidGains, mode: DerivativeMode) -> Self {
        Self {
            p: Pid::new(gains, mode),
            t: Pid::new(gains, mode),
        }
    }

    fn reset(&mut self) {
        self.p.reset();
        self.t.reset();
    }
}

/// All control loop instances
///
/// `mv` wheel velocity, `mp` wheel position hold, `cv` chassis body
/// axes, `gp` gimbal position, `gv` gimbal rate.
#[derive(Debug, Clone, Copy)]
struct PidBank {
    mv: [Pid; 4],
    mp: [Pid; 4],
    cv: [Pid; 3],
    gp: GimbalPids,
    gv: GimbalPids,
}

impl PidBank {
    fn new(cfg: &ControlConfig) -> Self {
        // Inner (rate) loops differentiate the measurement so outer
        // setpoint steps cannot kick them
        Self {
            mv: [Pid::new(cfg.wheel_vel, DerivativeMode::OnMeasurement); 4],
            mp: [Pid::new(cfg.wheel_pos, DerivativeMode::OnError); 4],
            cv: [Pid::new(cfg.chassis, DerivativeMode::OnMeasurement); 3],
            gp: GimbalPids::new(cfg.gimbal_pos, DerivativeMode::OnError),
            gv: GimbalPids::new(cfg.gimbal_rate, DerivativeMode::OnMeasurement),
        }
    }

    fn reset(&mut self) {
        for pid in self.mv.iter_mut().chain(self.mp.iter_mut()) {
            pid.reset();
        }
        for pid in &mut self.cv {
            pid.reset();
        }
        self.gp.reset();
        self.gv.reset();
    }
}

/// Gimbal travel limits (rad), updated by POS_CALIB
#[derive(Debug, Clone, Copy)]
struct GimbalTravel {
    p_min: f32,
    p_max: f32,
    t_min: f32,
    t_max: f32,
}

/// The control pipeline context
pub struct Controller {
    state: CtlState,
    pid: PidBank,
    ramp: ChassisRamp,
    geometry: MecanumGeometry,
    travel: GimbalTravel,
    /// Per-axis measured-velocity correction factors
    vel_factors: (f32, f32, f32),
    phase: Phase,
    /// Milliseconds since the last fresh sensor message
    since_fresh_ms: f32,
    /// Wheel angles captured when position hold engaged
    hold_angles: Option<WheelAngles>,
    heartbeat: u32,
    config: ControlConfig,
}

impl Controller {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            state: CtlState::default(),
            pid: PidBank::new(&config),
            ramp: ChassisRamp::new(config.linear_ramp, config.angular_ramp),
            geometry: config.geometry,
            travel: GimbalTravel {
                p_min: -config.pan_travel,
                p_max: config.pan_travel,
                t_min: -config.tilt_travel,
                t_max: config.tilt_travel,
            },
            vel_factors: (1.0, 1.0, 1.0),
            phase: Phase::Uninitialized,
            since_fresh_ms: 0.0,
            hold_angles: None,
            heartbeat: 0,
            config,
        }
    }

    /// Zero all loop state, restore configured tuning, and arm the
    /// controller
    ///
    /// Also the only path out of [`Phase::Faulted`].
    ///
    /// Sensor offsets survive re-init: they describe the physical
    /// machine, not loop state.
    pub fn init(&mut self) {
        let imu_offset = self.state.calib.imu_offset;
        let mag_offset = self.state.calib.mag_offset;
        self.state.reset();
        self.state.calib.imu_offset = imu_offset;
        self.state.calib.mag_offset = mag_offset;
        self.pid = PidBank::new(&self.config);
        self.ramp = ChassisRamp::new(self.config.linear_ramp, self.config.angular_ramp);
        self.since_fresh_ms = 0.0;
        self.hold_angles = None;
        self.phase = Phase::Ready;
        log::info!("controller initialized");
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Live state snapshot (telemetry reads through this)
    pub fn state(&self) -> &CtlState {
        &self.state
    }

    /// Status report for STATU telemetry
    pub fn status(&self, frame_id: u32) -> StatuMsg {
        StatuMsg {
            frame_id,
            wdg: self.heartbeat,
            ini: match self.phase {
                Phase::Uninitialized => 0,
                Phase::Ready => 1,
                Phase::Running => 2,
                Phase::Faulted => 3,
            },
        }
    }

    /// Run one control tick
    ///
    /// Applies the decoded message batch, services calibration, checks
    /// feed staleness, runs the cascade, and dispatches exactly one
    /// actuator command. `dt` is the tick period in seconds.
    pub fn proc(&mut self, msgs: &[Msg], dt: f32, actuators: &mut dyn Actuators) {
        if self.phase == Phase::Uninitialized {
            log::warn!("proc before init, tick dropped");
            return;
        }

        let mut fresh = false;
        for msg in msgs {
            fresh |= self.state.apply(msg);
        }
        self.apply_calibration();

        if fresh {
            self.since_fresh_ms = 0.0;
        } else {
            self.since_fresh_ms += dt * 1e3;
        }
        if self.since_fresh_ms > ERR_TSK_TMS && self.phase != Phase::Faulted {
            log::error!(
                "sensor feed stale for {:.0} ms, faulting",
                self.since_fresh_ms
            );
            self.phase = Phase::Faulted;
        }
        if self.phase == Phase::Faulted {
            actuators.dispatch(&ActuatorCommand::default());
            self.heartbeat = self.heartbeat.wrapping_add(1);
            return;
        }
        self.phase = Phase::Running;

        let cmd = ActuatorCommand {
            wheels: self.chassis_tick(dt),
            ..self.gimbal_tick(dt)
        };
        self.state.mc.w = cmd.wheels;
        actuators.dispatch(&cmd);
        self.heartbeat = self.heartbeat.wrapping_add(1);
    }

    /// Chassis cascade: ramp -> body loops -> kinematics -> wheel loops
    fn chassis_tick(&mut self, dt: f32) -> [f32; 4] {
        if self.state.fs_cmd & FS_CHASSIS_EN == 0 {
            self.ramp.reset();
            for pid in self.pid.mv.iter_mut().chain(self.pid.mp.iter_mut()) {
                pid.reset();
            }
            for pid in &mut self.pid.cv {
                pid.reset();
            }
            self.hold_angles = None;
            return [0.0; 4];
        }

        if self.state.fs_cmd & FS_HOLD != 0 {
            // Position hold: servo each wheel to the angle captured
            // when hold engaged, through the velocity loops
            let held = *self.hold_angles.get_or_insert(self.state.ma);
            let mut out = [0.0f32; 4];
            for i in 0..4 {
                let rate_set = self.pid.mp[i].step(held.a[i], self.state.ma.a[i], dt);
                out[i] = self.pid.mv[i].step(rate_set, self.state.mv.w[i], dt);
            }
            return out;
        }
        self.hold_angles = None;

        let ramped = self.ramp.step(
            (self.state.cv.x, self.state.cv.y, self.state.cv.z),
            dt,
        );
        let (fx, fy, fz) = self.vel_factors;
        let measured = [
            self.state.cm.x * fx,
            self.state.cm.y * fy,
            self.state.cm.z * fz,
        ];
        // Body loops trim the feedforward setpoint
        let body = [
            ramped.0 + self.pid.cv[0].step(ramped.0, measured[0], dt),
            ramped.1 + self.pid.cv[1].step(ramped.1, measured[1], dt),
            ramped.2 + self.pid.cv[2].step(ramped.2, measured[2], dt),
        ];
        let wheel_set = self.geometry.inverse(body[0], body[1], body[2]);

        let mut out = [0.0f32; 4];
        for i in 0..4 {
            out[i] = self.pid.mv[i].step(wheel_set[i], self.state.mv.w[i], dt);
        }
        out
    }

    /// Gimbal cascade: position loops -> rate loops
    fn gimbal_tick(&mut self, dt: f32) -> ActuatorCommand {
        if self.state.fs_cmd & FS_GIMBAL_EN == 0 {
            self.pid.gp.reset();
            self.pid.gv.reset();
            return ActuatorCommand::default();
        }

        let pan_set = self.state.gc.pan.clamp(self.travel.p_min, self.travel.p_max);
        let tilt_set = self.state.gc.tilt.clamp(self.travel.t_min, self.travel.t_max);

        let rate_set_p = self.pid.gp.p.step(pan_set, self.state.gv.pan, dt);
        let rate_set_t = self.pid.gp.t.step(tilt_set, self.state.gv.tilt, dt);

        // Measured rates from odometry when available; the finite
        // difference of quantized positions is a fallback only
        let (rate_p, rate_t) = match self.state.gr {
            Some(r) => (r.pan, r.tilt),
            None if dt > 0.0 => (
                (self.state.gv.pan - self.state.gp_prev.pan) / dt,
                (self.state.gv.tilt - self.state.gp_prev.tilt) / dt,
            ),
            None => (0.0, 0.0),
        };

        ActuatorCommand {
            wheels: [0.0; 4],
            pan: self.pid.gv.p.step(rate_set_p, rate_p, dt),
            tilt: self.pid.gv.t.step(rate_set_t, rate_t, dt),
        }
    }

    /// Drain the calibration side-channel into live configuration
    fn apply_calibration(&mut self) {
        for block in std::mem::take(&mut self.state.calib.pid) {
            self.apply_pid_calib(&block);
        }
        if let Some(mec) = self.state.calib.mec.take() {
            self.geometry = MecanumGeometry {
                lx: mec.lx as f32 / CALIB_VALUE_SCALE,
                ly: mec.ly as f32 / CALIB_VALUE_SCALE,
                wheel_radius: (mec.r1 as f32 + mec.r2 as f32) / 2.0 / CALIB_VALUE_SCALE,
            };
            log::info!(
                "kinematics geometry updated: lx={} ly={} r={}",
                self.geometry.lx,
                self.geometry.ly,
                self.geometry.wheel_radius
            );
        }
        if let Some(pos) = self.state.calib.pos.take() {
            self.travel = GimbalTravel {
                p_min: pos.p_min as f32 / CALIB_VALUE_SCALE,
                p_max: pos.p_max as f32 / CALIB_VALUE_SCALE,
                t_min: pos.t_min as f32 / CALIB_VALUE_SCALE,
                t_max: pos.t_max as f32 / CALIB_VALUE_SCALE,
            };
        }
        if let Some(vel) = self.state.calib.vel.take() {
            self.vel_factors = vel;
        }
        self.service_auto_calibration();
    }

    /// One PID gain block, addressed at a loop bank
    fn apply_pid_calib(&mut self, block: &PidCalib) {
        let gains = PidGains::new(
            block.kp as f32 / CALIB_VALUE_SCALE,
            block.ki as f32 / CALIB_VALUE_SCALE,
            block.kd as f32 / CALIB_VALUE_SCALE,
            block.imax as f32 / CALIB_VALUE_SCALE,
            block.omax as f32 / CALIB_VALUE_SCALE,
        );
        match block.loop_id {
            0 => {
                for pid in &mut self.pid.mv {
                    pid.set_gains(gains);
                }
            }
            1 => {
                for pid in &mut self.pid.mp {
                    pid.set_gains(gains);
                }
            }
            2 => {
                for pid in &mut self.pid.cv {
                    pid.set_gains(gains);
                }
            }
            3 => {
                self.pid.gp.p.set_gains(gains);
                self.pid.gp.t.set_gains(gains);
            }
            4 => {
                self.pid.gv.p.set_gains(gains);
                self.pid.gv.t.set_gains(gains);
            }
            other => log::warn!("pid calibration for unknown loop {other}, ignored"),
        }
    }

    /// Auto-calibration flags: capture current sensor readings as the
    /// zero offsets, one shot per flag
    fn service_auto_calibration(&mut self) {
        let flags = self.state.calib.auto_flags;
        if flags == 0 {
            return;
        }
        if flags & CALIB_FLAG_IMU != 0 {
            if let Some(sample) = self.state.imu {
                self.state.calib.imu_offset = Some(sample);
                self.state.calib.auto_flags &= !CALIB_FLAG_IMU;
                log::info!("imu offsets captured from live sample");
            }
        }
        if flags & CALIB_FLAG_MAG != 0 {
            if let Some(sample) = self.state.mag {
                self.state.calib.mag_offset = Some(sample);
                self.state.calib.auto_flags &= !CALIB_FLAG_MAG;
                log::info!("mag offsets captured from live sample");
            }
        }
        if flags & CALIB_FLAG_POS != 0 {
            // Re-center travel on the current gimbal position
            let half_p = (self.travel.p_max - self.travel.p_min) / 2.0;
            let half_t = (self.travel.t_max - self.travel.t_min) / 2.0;
            self.travel = GimbalTravel {
                p_min: self.state.gv.pan - half_p,
                p_max: self.state.gv.pan + half_p,
                t_min: self.state.gv.tilt - half_t,
                t_max: self.state.gv.tilt + half_t,
            };
            self.state.calib.auto_flags &= !CALIB_FLAG_POS;
            log::info!("gimbal travel re-centered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::body::{CBusMsg, ChassisCmd, GimbalCounts, MecCalibMsg, OdoMsg, PidCalibMsg};

    #[derive(Default)]
    struct Sink {
        last: Option<ActuatorCommand>,
        dispatches: usize,
    }

    impl Actuators for Sink {
        fn dispatch(&mut self, cmd: &ActuatorCommand) {
            self.last = Some(*cmd);
            self.dispatches += 1;
        }
    }

    fn controller() -> Controller {
        let mut ctl = Controller::new(crate::config::AppConfig::default().control);
        ctl.init();
        ctl
    }

    fn odo(frame_id: u32) -> Msg {
        Msg::Odo(OdoMsg {
            frame_id,
            ..OdoMsg::default()
        })
    }

    fn drive_cmd(frame_id: u32, x: i16, fs: u32) -> Msg {
        Msg::CBus(CBusMsg {
            frame_id,
            fs,
            cv: ChassisCmd { x, y: 0, z: 0 },
            gv: GimbalCounts::default(),
        })
    }

    #[test]
    fn test_proc_before_init_dispatches_nothing() {
        let mut ctl = Controller::new(crate::config::AppConfig::default().control);
        let mut sink = Sink::default();
        ctl.proc(&[], 0.01, &mut sink);
        assert_eq!(sink.dispatches, 0);
        assert_eq!(ctl.phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_forward_setpoint_drives_all_wheels_forward() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        ctl.proc(&[drive_cmd(1, 1000, FS_CHASSIS_EN)], 0.01, &mut sink);
        for tick in 2..20 {
            ctl.proc(&[odo(tick)], 0.01, &mut sink);
        }
        let cmd = sink.last.unwrap();
        for w in cmd.wheels {
            assert!(w > 0.0, "wheel not driving forward: {cmd:?}");
        }
        assert_eq!(ctl.phase(), Phase::Running);
    }

    #[test]
    fn test_chassis_disabled_zeroes_wheels() {
        let mut ctl = controller();
        let mut sink = Sink::default();
        ctl.proc(&[drive_cmd(1, 1000, 0)], 0.01, &mut sink);
        ctl.proc(&[odo(2)], 0.01, &mut sink);
        assert_eq!(sink.last.unwrap().wheels, [0.0; 4]);
    }

    #[test]
    fn test_stale_feed_faults_and_zeroes() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        ctl.proc(&[drive_cmd(1, 1000, FS_CHASSIS_EN), odo(1)], 0.01, &mut sink);
        assert_eq!(ctl.phase(), Phase::Running);

        // 11 empty ticks at 10 ms crosses the 100 ms limit
        for _ in 0..11 {
            ctl.proc(&[], 0.01, &mut sink);
        }
        assert_eq!(ctl.phase(), Phase::Faulted);
        assert_eq!(sink.last.unwrap(), ActuatorCommand::default());

        // Fresh data alone does not recover
        ctl.proc(&[odo(2)], 0.01, &mut sink);
        assert_eq!(ctl.phase(), Phase::Faulted);
        assert_eq!(sink.last.unwrap(), ActuatorCommand::default());

        // External re-init does
        ctl.init();
        assert_eq!(ctl.phase(), Phase::Ready);
        ctl.proc(&[odo(3)], 0.01, &mut sink);
        assert_eq!(ctl.phase(), Phase::Running);
    }

    #[test]
    fn test_heartbeat_counts_every_tick() {
        let mut ctl = controller();
        let mut sink = Sink::default();
        for tick in 0..5 {
            ctl.proc(&[odo(tick)], 0.01, &mut sink);
        }
        assert_eq!(ctl.status(1).wdg, 5);
        assert_eq!(ctl.status(1).ini, 2);
    }

    #[test]
    fn test_gimbal_travel_clamps_setpoint() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        // Pan setpoint of 3 rad exceeds the 1.57 rad travel
        let cmd = Msg::CBus(CBusMsg {
            frame_id: 1,
            fs: FS_GIMBAL_EN,
            cv: ChassisCmd::default(),
            gv: GimbalCounts { p: 3000, t: 0 },
        });
        ctl.proc(&[cmd, odo(1)], 0.01, &mut sink);
        let clamped = sink.last.unwrap().pan;

        ctl.init();
        let cmd = Msg::CBus(CBusMsg {
            frame_id: 2,
            fs: FS_GIMBAL_EN,
            cv: ChassisCmd::default(),
            gv: GimbalCounts { p: 1570, t: 0 },
        });
        ctl.proc(&[cmd, odo(2)], 0.01, &mut sink);
        let at_limit = sink.last.unwrap().pan;

        assert!((clamped - at_limit).abs() < 1e-6);
    }

    #[test]
    fn test_gimbal_rate_loop_uses_measured_rate() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        // Gimbal at rest at its setpoint but spinning at a measured
        // 2.0 rad/s: the rate loop must brake, not sit at zero
        let enable = Msg::CBus(CBusMsg {
            frame_id: 1,
            fs: FS_GIMBAL_EN,
            cv: ChassisCmd::default(),
            gv: GimbalCounts::default(),
        });
        let spinning = Msg::Odo(OdoMsg {
            frame_id: 1,
            gv: GimbalCounts { p: 2000, t: 0 },
            ..OdoMsg::default()
        });
        ctl.proc(&[enable, spinning], 0.01, &mut sink);
        let cmd = sink.last.unwrap();
        assert!(cmd.pan < 0.0, "no braking against measured rate: {cmd:?}");
        assert_eq!(cmd.tilt, 0.0);
    }

    #[test]
    fn test_imu_offsets_survive_reinit() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        ctl.proc(
            &[Msg::ImuCalib(crate::msg::body::ImuCalibMsg {
                frame_id: 1,
                ax: 100,
                ay: 0,
                az: 0,
                gx: 0,
                gy: 0,
                gz: 0,
            })],
            0.01,
            &mut sink,
        );
        ctl.init();

        let imu = Msg::Imu(crate::msg::body::ImuMsg {
            frame_id: 2,
            ax: 130,
            ..crate::msg::body::ImuMsg::default()
        });
        ctl.proc(&[imu], 0.01, &mut sink);
        assert_eq!(ctl.state.imu.unwrap().ax, 30, "offset lost across init");
    }

    #[test]
    fn test_pid_calib_retunes_wheel_loops() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        let calib = Msg::PidCalib(PidCalibMsg {
            frame_id: 1,
            data: PidCalib {
                loop_id: 0,
                kp: 9000,
                omax: 50_000,
                ..PidCalib::default()
            },
        });
        ctl.proc(&[calib, odo(1)], 0.01, &mut sink);
        assert_eq!(ctl.pid.mv[0].gains().kp, 9.0);
        assert_eq!(ctl.pid.mv[3].gains().output_limit, 50.0);
    }

    #[test]
    fn test_mec_calib_updates_geometry() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        let calib = Msg::MecCalib(MecCalibMsg {
            frame_id: 1,
            lx: 150,
            ly: 180,
            r1: 80,
            r2: 80,
        });
        ctl.proc(&[calib, odo(1)], 0.01, &mut sink);
        assert!((ctl.geometry.lx - 0.15).abs() < 1e-6);
        assert!((ctl.geometry.wheel_radius - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_hold_mode_resists_displacement() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        ctl.proc(
            &[drive_cmd(1, 0, FS_CHASSIS_EN | FS_HOLD), odo(1)],
            0.01,
            &mut sink,
        );
        // Wheel 0 pushed off its held angle
        let pushed = Msg::Motor(crate::msg::body::MotorMsg {
            id: 0,
            frame_id: 2,
            angle: 8192, // one full revolution
            ..crate::msg::body::MotorMsg::default()
        });
        ctl.proc(&[pushed], 0.01, &mut sink);
        let cmd = sink.last.unwrap();
        assert!(cmd.wheels[0] < 0.0, "hold loop should drive back: {cmd:?}");
        assert_eq!(cmd.wheels[1], 0.0);
    }

    #[test]
    fn test_auto_imu_calibration_captures_offsets() {
        let mut ctl = controller();
        let mut sink = Sink::default();

        let imu = Msg::Imu(crate::msg::body::ImuMsg {
            frame_id: 1,
            ax: 120,
            ay: -40,
            az: 16384,
            gx: 3,
            gy: -2,
            gz: 1,
        });
        let calib = Msg::Calib(crate::msg::body::CalibMsg {
            frame_id: 1,
            auto_cali_flag: CALIB_FLAG_IMU,
        });
        ctl.proc(&[imu, calib], 0.01, &mut sink);
        let offset = ctl.state.calib.imu_offset.unwrap();
        assert_eq!(offset.ax, 120);
        assert_eq!(ctl.state.calib.auto_flags & CALIB_FLAG_IMU, 0);

        // Next sample arrives zero-corrected
        let imu2 = Msg::Imu(crate::msg::body::ImuMsg {
            frame_id: 2,
            ax: 125,
            ay: -40,
            az: 16384,
            gx: 3,
            gy: -2,
            gz: 1,
        });
        ctl.proc(&[imu2], 0.01, &mut sink);
        assert_eq!(ctl.state.imu.unwrap().ax, 5);
        assert_eq!(ctl.state.imu.unwrap().gz, 0);
    }
}
