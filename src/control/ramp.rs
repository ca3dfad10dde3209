//! Setpoint slew ramps
//!
//! The chassis setpoint is shaped through per-axis ramps before the
//! cascade so a step command from the supervisor turns into a bounded
//! acceleration at the wheels.

/// Rate-limited approach to a moving target
#[derive(Debug, Clone, Copy)]
pub struct Ramp {
    /// Maximum slew per second
    rate: f32,
    value: f32,
}

impl Ramp {
    pub const fn new(rate: f32) -> Self {
        Self { rate, value: 0.0 }
    }

    /// Current ramp output
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Snap to zero
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Move toward `target` by at most `rate * dt`
    pub fn step(&mut self, target: f32, dt: f32) -> f32 {
        if dt <= 0.0 {
            return self.value;
        }
        let max_delta = self.rate * dt;
        self.value += (target - self.value).clamp(-max_delta, max_delta);
        self.value
    }
}

/// Chassis setpoint ramps, one per body axis
#[derive(Debug, Clone, Copy)]
pub struct ChassisRamp {
    pub x: Ramp,
    pub y: Ramp,
    pub z: Ramp,
}

impl ChassisRamp {
    pub const fn new(linear_rate: f32, angular_rate: f32) -> Self {
        Self {
            x: Ramp::new(linear_rate),
            y: Ramp::new(linear_rate),
            z: Ramp::new(angular_rate),
        }
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
    }

    pub fn step(&mut self, target: (f32, f32, f32), dt: f32) -> (f32, f32, f32) {
        (
            self.x.step(target.0, dt),
            self.y.step(target.1, dt),
            self.z.step(target.2, dt),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_limits_slew() {
        let mut ramp = Ramp::new(2.0);
        assert_eq!(ramp.step(10.0, 0.1), 0.2);
        assert_eq!(ramp.step(10.0, 0.1), 0.4);
    }

    #[test]
    fn test_ramp_settles_exactly_on_target() {
        let mut ramp = Ramp::new(100.0);
        ramp.step(0.5, 0.1);
        assert_eq!(ramp.value(), 0.5);
        ramp.step(0.5, 0.1);
        assert_eq!(ramp.value(), 0.5);
    }

    #[test]
    fn test_ramp_tracks_downward() {
        let mut ramp = Ramp::new(1.0);
        ramp.step(1.0, 2.0);
        assert_eq!(ramp.value(), 1.0);
        ramp.step(-1.0, 0.5);
        assert_eq!(ramp.value(), 0.5);
    }

    #[test]
    fn test_zero_dt_holds() {
        let mut ramp = Ramp::new(1.0);
        ramp.step(1.0, 0.1);
        let held = ramp.value();
        assert_eq!(ramp.step(5.0, 0.0), held);
    }
}
