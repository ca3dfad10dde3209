//! End-to-end link tests: frames through the codec and into the
//! control pipeline

use yantra_io::config::AppConfig;
use yantra_io::control::ctl::{ActuatorCommand, Actuators, FS_CHASSIS_EN};
use yantra_io::control::{Controller, Phase};
use yantra_io::msg::body::{CBusMsg, ChassisCmd, ChassisCounts, GimbalCounts, OdoMsg};
use yantra_io::msg::{ByteQueue, Msg, MsgCodec, MsgKind, MSG_LEN_MIN};

#[derive(Default)]
struct Sink {
    last: Option<ActuatorCommand>,
}

impl Actuators for Sink {
    fn dispatch(&mut self, cmd: &ActuatorCommand) {
        self.last = Some(*cmd);
    }
}

fn armed_controller() -> Controller {
    let mut ctl = Controller::new(AppConfig::default().control);
    ctl.init();
    ctl
}

#[test]
fn test_registry_ids_and_tokens_are_unique() {
    for (i, a) in MsgKind::ALL.iter().enumerate() {
        for b in &MsgKind::ALL[i + 1..] {
            assert_ne!(a.id(), b.id());
            assert_ne!(a.token(), b.token());
        }
    }
}

#[test]
fn test_every_kind_round_trips_over_the_wire() {
    let mut codec = MsgCodec::new();
    let mut q = ByteQueue::<1024>::new();

    for kind in MsgKind::ALL {
        let msg = Msg::default_of(kind);
        let written = codec.push(&mut q, &msg).unwrap();
        assert_eq!(written, kind.body_len() as usize + 6);
        assert_eq!(codec.pop(&mut q).unwrap().unwrap(), msg);
    }
}

#[test]
fn test_underrun_never_consumes() {
    let mut codec = MsgCodec::new();
    let mut q = ByteQueue::<1024>::new();

    q.push(&[0x01; MSG_LEN_MIN - 1]);
    for _ in 0..10 {
        assert!(codec.pop(&mut q).unwrap().is_none());
    }
    assert_eq!(q.available(), MSG_LEN_MIN - 1);
}

#[test]
fn test_decoder_resynchronizes_through_garbage_between_frames() {
    let mut codec = MsgCodec::new();
    let mut q = ByteQueue::<1024>::new();

    let first = Msg::Odo(OdoMsg {
        frame_id: 1,
        ..OdoMsg::default()
    });
    let second = Msg::Odo(OdoMsg {
        frame_id: 2,
        ..OdoMsg::default()
    });

    codec.push(&mut q, &first).unwrap();
    q.push(&[0xde, 0xad, 0xbe, 0xef]);
    codec.push(&mut q, &second).unwrap();

    let mut decoded = Vec::new();
    codec.drain(&mut q, &mut decoded);
    assert_eq!(decoded, vec![first, second]);
    assert_eq!(q.available(), 0);
}

#[test]
fn test_odo_scale_feeds_physical_units_to_the_controller() {
    let mut codec = MsgCodec::new();
    let mut q = ByteQueue::<1024>::new();

    // 1.5 m/s forward measured, stored as 1500 on the wire
    let odo = Msg::Odo(OdoMsg {
        frame_id: 1,
        fs: 0,
        cp: ChassisCounts::default(),
        cv: ChassisCounts {
            x: 1500,
            y: 0,
            z: 0,
        },
        gp: GimbalCounts::default(),
        gv: GimbalCounts::default(),
    });
    codec.push(&mut q, &odo).unwrap();

    let mut ctl = armed_controller();
    let mut sink = Sink::default();
    let mut decoded = Vec::new();
    codec.drain(&mut q, &mut decoded);
    ctl.proc(&decoded, 0.01, &mut sink);

    assert!((ctl.state().cm.x - 1.5).abs() < 1e-6);
}

#[test]
fn test_corrupted_drive_command_is_dropped_not_acted_on() {
    let mut codec = MsgCodec::new();
    let mut q = ByteQueue::<1024>::new();

    let drive = Msg::CBus(CBusMsg {
        frame_id: 1,
        fs: FS_CHASSIS_EN,
        cv: ChassisCmd {
            x: 2000,
            y: 0,
            z: 0,
        },
        gv: GimbalCounts::default(),
    });
    codec.push(&mut q, &drive).unwrap();

    // Flip one bit in the body
    let mut frame = [0u8; 64];
    let n = q.pop(&mut frame);
    frame[8] ^= 0x40;
    q.push(&frame[..n]);

    let mut decoded = Vec::new();
    codec.drain(&mut q, &mut decoded);
    assert!(decoded.is_empty());

    let mut ctl = armed_controller();
    let mut sink = Sink::default();
    ctl.proc(
        &[Msg::Odo(OdoMsg::default())],
        0.01,
        &mut sink,
    );
    assert_eq!(sink.last.unwrap().wheels, [0.0; 4], "no command, no motion");
}

#[test]
fn test_watchdog_faults_after_100ms_and_recovers_only_on_init() {
    let mut ctl = armed_controller();
    let mut sink = Sink::default();

    let drive = Msg::CBus(CBusMsg {
        frame_id: 1,
        fs: FS_CHASSIS_EN,
        cv: ChassisCmd {
            x: 1000,
            y: 0,
            z: 0,
        },
        gv: GimbalCounts::default(),
    });
    ctl.proc(&[drive, Msg::Odo(OdoMsg::default())], 0.01, &mut sink);
    for tick in 1..5 {
        ctl.proc(
            &[Msg::Odo(OdoMsg {
                frame_id: tick,
                ..OdoMsg::default()
            })],
            0.01,
            &mut sink,
        );
    }
    assert_eq!(ctl.phase(), Phase::Running);
    assert!(sink.last.unwrap().wheels[0] > 0.0);

    // Feed stops: fault within 100 ms, outputs zeroed and held at zero
    for _ in 0..12 {
        ctl.proc(&[], 0.01, &mut sink);
    }
    assert_eq!(ctl.phase(), Phase::Faulted);
    assert_eq!(sink.last.unwrap(), ActuatorCommand::default());

    ctl.proc(
        &[Msg::Odo(OdoMsg {
            frame_id: 9,
            ..OdoMsg::default()
        })],
        0.01,
        &mut sink,
    );
    assert_eq!(ctl.phase(), Phase::Faulted, "fresh data alone must not recover");

    ctl.init();
    ctl.proc(
        &[Msg::Odo(OdoMsg {
            frame_id: 10,
            ..OdoMsg::default()
        })],
        0.01,
        &mut sink,
    );
    assert_eq!(ctl.phase(), Phase::Running);
}
