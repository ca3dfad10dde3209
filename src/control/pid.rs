//! PID controller instances for the control loop banks
//!
//! Every instance enforces its integral and output clamps on every
//! step, so arbitrarily large errors can never wind the accumulator or
//! the output past the configured limits. The derivative source is
//! fixed at construction: cascaded inner loops run derivative on the
//! measurement so setpoint steps from the outer loop do not kick them.

use serde::{Deserialize, Serialize};

/// Which signal the derivative term differentiates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivativeMode {
    /// d(error)/dt
    OnError,
    /// -d(measurement)/dt
    OnMeasurement,
}

/// PID gain block, loadable from config or a PID_CALIB payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    /// Windup clamp: `|integral term| <= integral_limit`
    pub integral_limit: f32,
    /// Saturation clamp: `|output| <= output_limit`
    pub output_limit: f32,
}

impl PidGains {
    pub const fn new(kp: f32, ki: f32, kd: f32, integral_limit: f32, output_limit: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_limit,
            output_limit,
        }
    }
}

/// One PID loop instance
#[derive(Debug, Clone, Copy)]
pub struct Pid {
    gains: PidGains,
    mode: DerivativeMode,
    integral: f32,
    prev_error: f32,
    prev_measured: f32,
    output: f32,
    primed: bool,
}

impl Pid {
    pub const fn new(gains: PidGains, mode: DerivativeMode) -> Self {
        Self {
            gains,
            mode,
            integral: 0.0,
            prev_error: 0.0,
            prev_measured: 0.0,
            output: 0.0,
            primed: false,
        }
    }

    /// Replace the gain block, keeping loop state
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Zero the accumulator and history
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.prev_measured = 0.0;
        self.output = 0.0;
        self.primed = false;
    }

    /// Last computed output
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Integral accumulator (clamped)
    pub fn integral(&self) -> f32 {
        self.integral
    }

    /// Advance the loop one step and return the clamped output
    ///
    /// A degenerate `dt <= 0` holds the previous output; a step never
    /// fails.
    pub fn step(&mut self, setpoint: f32, measured: f32, dt: f32) -> f32 {
        if dt <= 0.0 {
            return self.output;
        }

        let error = setpoint - measured;

        self.integral = (self.integral + self.gains.ki * error * dt)
            .clamp(-self.gains.integral_limit, self.gains.integral_limit);

        let derivative = if !self.primed {
            0.0
        } else {
            match self.mode {
                DerivativeMode::OnError => self.gains.kd * (error - self.prev_error) / dt,
                DerivativeMode::OnMeasurement => {
                    -self.gains.kd * (measured - self.prev_measured) / dt
                }
            }
        };

        self.prev_error = error;
        self.prev_measured = measured;
        self.primed = true;

        self.output = (self.gains.kp * error + self.integral + derivative)
            .clamp(-self.gains.output_limit, self.gains.output_limit);
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gains() -> PidGains {
        PidGains::new(1.0, 0.5, 0.1, 2.0, 10.0)
    }

    #[test]
    fn test_proportional_response() {
        let mut pid = Pid::new(PidGains::new(2.0, 0.0, 0.0, 1.0, 100.0), DerivativeMode::OnError);
        assert_eq!(pid.step(3.0, 1.0, 0.01), 4.0);
        assert_eq!(pid.step(1.0, 1.0, 0.01), 0.0);
    }

    #[test]
    fn test_output_clamp_under_huge_error() {
        let mut pid = Pid::new(gains(), DerivativeMode::OnError);
        for _ in 0..100 {
            let out = pid.step(1e9, -1e9, 0.01);
            assert!(out.abs() <= 10.0, "output {out} exceeded limit");
            assert!(pid.integral().abs() <= 2.0, "integral wound past limit");
        }
    }

    #[test]
    fn test_integral_accumulates_and_clamps() {
        let mut pid = Pid::new(PidGains::new(0.0, 1.0, 0.0, 0.5, 10.0), DerivativeMode::OnError);
        // Constant error of 1.0 at 10ms steps; integral saturates at 0.5
        for _ in 0..1000 {
            pid.step(1.0, 0.0, 0.01);
        }
        assert!((pid.integral() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_holds_output() {
        let mut pid = Pid::new(gains(), DerivativeMode::OnError);
        let out = pid.step(5.0, 0.0, 0.01);
        assert_eq!(pid.step(100.0, -100.0, 0.0), out);
        assert_eq!(pid.step(100.0, -100.0, -1.0), out);
    }

    #[test]
    fn test_derivative_on_measurement_ignores_setpoint_step() {
        let g = PidGains::new(0.0, 0.0, 1.0, 1.0, 100.0);
        let mut on_err = Pid::new(g, DerivativeMode::OnError);
        let mut on_meas = Pid::new(g, DerivativeMode::OnMeasurement);

        on_err.step(0.0, 0.0, 0.01);
        on_meas.step(0.0, 0.0, 0.01);

        // Setpoint jumps, measurement holds still
        let kick = on_err.step(1.0, 0.0, 0.01);
        let calm = on_meas.step(1.0, 0.0, 0.01);
        assert!(kick > 10.0);
        assert_eq!(calm, 0.0);
    }

    #[test]
    fn test_first_step_has_no_derivative_kick() {
        let mut pid = Pid::new(PidGains::new(0.0, 0.0, 5.0, 1.0, 100.0), DerivativeMode::OnError);
        assert_eq!(pid.step(10.0, 0.0, 0.001), 0.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut pid = Pid::new(gains(), DerivativeMode::OnError);
        pid.step(5.0, 0.0, 0.01);
        pid.reset();
        assert_eq!(pid.output(), 0.0);
        assert_eq!(pid.integral(), 0.0);
    }
}
