/// Fixed timestep accumulator.
/// Keeps movement deterministic regardless of frame time: the resolver always
/// sees the same `dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Most ticks a single frame may produce.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    /// Cap the ticks per frame. Excess time is dropped, so a long stall
    /// slows the game down instead of spiralling.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if self.dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        if self.dt <= 0.0 {
            return 0.0;
        }
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Drop any leftover time, e.g. after a level load.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// How a host turns frame time into resolver passes.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameClock {
    /// Zero or more passes of a constant `dt`.
    Fixed(FixedTimestep),
    /// One pass per frame with the frame's own `dt`, clamped to `max_dt`.
    Variable { max_dt: f32 },
}

/// Passes to run for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSteps {
    pub count: u32,
    pub dt: f32,
}

impl FrameSteps {
    /// `dt` repeated `count` times.
    pub fn iter(&self) -> impl Iterator<Item = f32> {
        std::iter::repeat(self.dt).take(self.count as usize)
    }
}

impl FrameClock {
    pub fn fixed(dt: f32) -> Self {
        FrameClock::Fixed(FixedTimestep::new(dt))
    }

    pub fn variable(max_dt: f32) -> Self {
        FrameClock::Variable { max_dt }
    }

    pub fn advance(&mut self, frame_dt: f32) -> FrameSteps {
        match self {
            FrameClock::Fixed(step) => FrameSteps {
                count: step.accumulate(frame_dt),
                dt: step.dt(),
            },
            FrameClock::Variable { max_dt } => {
                if frame_dt > 0.0 {
                    FrameSteps {
                        count: 1,
                        dt: frame_dt.min(*max_dt),
                    }
                } else {
                    FrameSteps { count: 0, dt: 0.0 }
                }
            }
        }
    }
}
