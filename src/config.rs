//! Configuration for the yantra-io daemon
//!
//! Loads configuration from a TOML file: serial link parameters, task
//! periods, chassis geometry and velocity limits, and one gain block
//! per control loop bank. Defaults match the stock chassis.

use crate::control::mecanum::MecanumGeometry;
use crate::control::pid::PidGains;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub link: LinkConfig,
    pub sched: SchedConfig,
    pub control: ControlConfig,
    pub logging: LoggingConfig,
}

/// Serial link configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    /// MCU serial port
    pub port: String,
    /// Baud rate
    pub baud: u32,
}

/// Task periods for the cooperative scheduler, in milliseconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedConfig {
    /// Control cascade period
    pub ctl_period_ms: u64,
    /// Watchdog / status period
    pub err_period_ms: u64,
    /// Telemetry transmit period
    pub tel_period_ms: u64,
}

/// Control-loop configuration: geometry, limits, and gain blocks
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlConfig {
    pub geometry: MecanumGeometry,
    /// Chassis linear setpoint slew (m/s per second)
    pub linear_ramp: f32,
    /// Chassis angular setpoint slew (rad/s per second)
    pub angular_ramp: f32,
    /// Gimbal pan travel (rad), symmetric about zero
    pub pan_travel: f32,
    /// Gimbal tilt travel (rad), symmetric about zero
    pub tilt_travel: f32,
    /// Wheel velocity loop gains (all four wheels)
    pub wheel_vel: PidGains,
    /// Wheel position-hold loop gains
    pub wheel_pos: PidGains,
    /// Chassis body loop gains (x, y, z axes)
    pub chassis: PidGains,
    /// Gimbal position loop gains (pan and tilt)
    pub gimbal_pos: PidGains,
    /// Gimbal rate loop gains (pan and tilt)
    pub gimbal_rate: PidGains,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig {
                port: "/dev/ttyS1".to_string(),
                baud: 921_600,
            },
            sched: SchedConfig {
                ctl_period_ms: 10,
                err_period_ms: 100,
                tel_period_ms: 50,
            },
            control: ControlConfig {
                geometry: MecanumGeometry::default(),
                linear_ramp: 2.0,
                angular_ramp: 6.0,
                pan_travel: 1.57,
                tilt_travel: 0.6,
                wheel_vel: PidGains::new(0.8, 2.0, 0.0, 5.0, 30.0),
                wheel_pos: PidGains::new(4.0, 0.0, 0.1, 1.0, 20.0),
                chassis: PidGains::new(0.5, 0.5, 0.0, 0.5, 2.0),
                gimbal_pos: PidGains::new(6.0, 0.0, 0.0, 0.5, 4.0),
                gimbal_rate: PidGains::new(1.2, 8.0, 0.0, 2.0, 8.0),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.link.port, config.link.port);
        assert_eq!(back.sched.ctl_period_ms, 10);
        assert_eq!(back.control.wheel_vel, config.control.wheel_vel);
    }

    #[test]
    fn test_partial_file_rejected() {
        let err = toml::from_str::<AppConfig>("[link]\nport = \"/dev/ttyS1\"\n");
        assert!(err.is_err());
    }
}
