//! Daemon wiring: transport <-> codec <-> controller superloop
//!
//! One thread owns the link and the control pipeline. Each loop
//! iteration pumps transport bytes through the codec into a pending
//! message batch, then lets the scheduler run whichever periodic tasks
//! came due: the control cascade, the watchdog/status task, and the
//! telemetry transmitter. Operator commands arrive over a crossbeam
//! channel and are folded into the same message batch the link feeds.

use crate::config::AppConfig;
use crate::control::{ActuatorCommand, Actuators, Controller, Phase};
use crate::error::Result;
use crate::msg::body::{CBusMsg, ChassisCmd, GimbalCounts, CBUS_VALUE_SCALE};
use crate::msg::{ByteQueue, Msg, MsgCodec, MsgKind};
use crate::sched::Scheduler;
use crate::transport::Transport;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Operator commands accepted while the superloop runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Re-arm the controller (the only way out of a fault)
    ReInit,
    /// Chassis velocity setpoint with functional-state bits
    Drive { vx: f32, vy: f32, wz: f32, fs: u32 },
    /// Zero setpoints and disable all loops
    Halt,
}

/// Records the newest actuator command; the motor hardware sits behind
/// this seam
#[derive(Default)]
struct CommandLatch {
    last: ActuatorCommand,
}

impl Actuators for CommandLatch {
    fn dispatch(&mut self, cmd: &ActuatorCommand) {
        self.last = *cmd;
        log::trace!("actuators: {cmd:?}");
    }
}

/// The daemon: link pump plus scheduled control tasks
pub struct App {
    transport: Box<dyn Transport>,
    codec: MsgCodec,
    rx: ByteQueue<1024>,
    tx: ByteQueue<1024>,
    /// Messages decoded since the last control tick
    pending: Vec<Msg>,
    controller: Controller,
    latch: CommandLatch,
    commands: Receiver<Command>,
    /// Outbound frame sequence counter
    seq: u32,
    config: AppConfig,
}

impl App {
    /// Build the daemon around an open transport
    ///
    /// Returns the command sender alongside; the controller comes up
    /// armed.
    pub fn new(config: AppConfig, transport: Box<dyn Transport>) -> (Self, Sender<Command>) {
        let (tx_cmd, rx_cmd) = unbounded();
        let mut controller = Controller::new(config.control.clone());
        controller.init();
        (
            Self {
                transport,
                codec: MsgCodec::new(),
                rx: ByteQueue::new(),
                tx: ByteQueue::new(),
                pending: Vec::new(),
                controller,
                latch: CommandLatch::default(),
                commands: rx_cmd,
                seq: 0,
                config,
            },
            tx_cmd,
        )
    }

    /// Run the superloop until `running` clears
    pub fn run(mut self, running: Arc<AtomicBool>) -> Result<()> {
        let mut sched = Scheduler::<App>::new();
        sched.add("ctl", self.config.sched.ctl_period_ms, |app, dt| {
            app.ctl_task(dt)
        });
        sched.add("err", self.config.sched.err_period_ms, |app, _| {
            app.err_task()
        });
        sched.add("tel", self.config.sched.tel_period_ms, |app, _| {
            app.tel_task()
        });

        log::info!("superloop running");
        let mut last = Instant::now();
        while running.load(Ordering::Relaxed) {
            self.pump_rx()?;

            let now = Instant::now();
            let elapsed = now.duration_since(last).as_millis() as u64;
            if elapsed > 0 {
                last = now;
                sched.tick(elapsed, &mut self);
            }

            self.pump_tx()?;
            thread::sleep(Duration::from_millis(1));
        }
        log::info!("superloop stopped; final stats: {:?}", self.codec.stats());
        Ok(())
    }

    /// Move link bytes into the codec queue and decode what is complete
    fn pump_rx(&mut self) -> Result<()> {
        let mut buf = [0u8; 256];
        loop {
            let n = self.transport.read(&mut buf)?;
            if n == 0 {
                break;
            }
            let accepted = self.rx.push(&buf[..n]);
            if accepted < n {
                log::warn!("rx queue full, dropped {} bytes", n - accepted);
            }
        }
        self.codec.drain(&mut self.rx, &mut self.pending);
        Ok(())
    }

    /// Write queued outbound frames to the transport
    fn pump_tx(&mut self) -> Result<()> {
        let mut buf = [0u8; 256];
        loop {
            let n = self.tx.pop(&mut buf);
            if n == 0 {
                break;
            }
            let mut written = 0;
            while written < n {
                written += self.transport.write(&buf[written..n])?;
            }
        }
        self.transport.flush()
    }

    /// Control task: fold operator commands into the batch, run the
    /// cascade once
    fn ctl_task(&mut self, dt: f32) {
        while let Ok(cmd) = self.commands.try_recv() {
            match cmd {
                Command::ReInit => self.controller.init(),
                Command::Drive { vx, vy, wz, fs } => {
                    self.seq = self.seq.wrapping_add(1);
                    self.pending.push(Msg::CBus(CBusMsg {
                        frame_id: self.seq,
                        fs,
                        cv: ChassisCmd {
                            x: (vx * CBUS_VALUE_SCALE) as i16,
                            y: (vy * CBUS_VALUE_SCALE) as i16,
                            z: (wz * CBUS_VALUE_SCALE) as i16,
                        },
                        gv: GimbalCounts::default(),
                    }));
                }
                Command::Halt => {
                    self.seq = self.seq.wrapping_add(1);
                    self.pending.push(Msg::CBus(CBusMsg {
                        frame_id: self.seq,
                        fs: 0,
                        cv: ChassisCmd::default(),
                        gv: GimbalCounts::default(),
                    }));
                }
            }
        }

        let batch = std::mem::take(&mut self.pending);
        self.controller.proc(&batch, dt, &mut self.latch);
    }

    /// Watchdog/status task: report the phase and emit STATU
    fn err_task(&mut self) {
        if self.controller.phase() == Phase::Faulted {
            log::warn!("controller faulted, awaiting re-init");
        }
        self.seq = self.seq.wrapping_add(1);
        let statu = Msg::Statu(self.controller.status(self.seq));
        if let Err(e) = self.codec.push(&mut self.tx, &statu) {
            log::warn!("status frame dropped: {e}");
        }
    }

    /// Telemetry task: echo subscribed sensor snapshots
    fn tel_task(&mut self) {
        let subs = self.controller.state().subscriptions;
        if subs.is_empty() {
            return;
        }

        let state = self.controller.state();
        let (imu, mag, uwb, quat) = (state.imu, state.mag, state.uwb, state.quat);

        let mut out = Vec::new();
        if subs.contains(MsgKind::Imu) {
            if let Some(imu) = imu {
                out.push(Msg::Imu(imu));
            }
        }
        if subs.contains(MsgKind::Mag) {
            if let Some(mag) = mag {
                out.push(Msg::Mag(mag));
            }
        }
        if subs.contains(MsgKind::Uwb) {
            if let Some(uwb) = uwb {
                out.push(Msg::Uwb(uwb));
            }
        }
        if subs.contains(MsgKind::Ahrs) {
            if let Some(q) = quat {
                self.seq = self.seq.wrapping_add(1);
                out.push(Msg::Ahrs(crate::msg::body::AhrsMsg {
                    frame_id: self.seq,
                    q,
                }));
            }
        }

        for msg in out {
            if let Err(e) = self.codec.push(&mut self.tx, &msg) {
                log::warn!("telemetry frame dropped: {e}");
            }
        }
    }

    /// Latest actuator command (diagnostics)
    pub fn last_command(&self) -> ActuatorCommand {
        self.latch.last
    }

    /// Controller phase (diagnostics)
    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }
}
