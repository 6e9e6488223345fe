use core::f64::consts::TAU;

/// Springs that have not converged after this long are snapped to their target.
const MAX_SPRING_MS: u64 = 10_000;

/// A spring counts as at rest once its speed drops below this (units per second).
const REST_VELOCITY: f64 = 1.0;

/// Returns the stiffness of a unit-mass spring that nominally takes `duration_ms`.
///
/// `stiffness = (2π / seconds)²`, so `250ms` maps to `≈ 631.65`.
pub fn stiffness_for_duration(duration_ms: u64) -> f64 {
    let secs = duration_ms.max(1) as f64 / 1000.0;
    let omega = TAU / secs;
    omega * omega * SpringParams::MASS
}

/// Physical parameters of a damped spring (mass is fixed to 1).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringParams {
    pub stiffness: f64,
    /// `1.0` is critically damped, below oscillates, above creeps.
    pub damping_ratio: f64,
    /// Distance from the target under which the spring is considered converged.
    pub epsilon: f64,
}

impl SpringParams {
    pub const MASS: f64 = 1.0;
    pub const DEFAULT_EPSILON: f64 = 0.5;

    pub fn new(stiffness: f64, damping_ratio: f64, epsilon: f64) -> Self {
        Self {
            stiffness: stiffness.max(0.0),
            damping_ratio: damping_ratio.max(0.0),
            epsilon: epsilon.max(f64::EPSILON),
        }
    }

    /// A spring that nominally settles in `duration_ms` while keeping its overshoot
    /// characteristics (controlled by `damping_ratio`).
    pub fn from_duration(duration_ms: u64, damping_ratio: f64) -> Self {
        Self::new(
            stiffness_for_duration(duration_ms),
            damping_ratio,
            Self::DEFAULT_EPSILON,
        )
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.max(f64::EPSILON);
        self
    }

    /// Damping coefficient: `ratio · 2·sqrt(k·m)`.
    pub fn damping(&self) -> f64 {
        self.damping_ratio * 2.0 * (Self::MASS * self.stiffness).sqrt()
    }
}

/// A damped spring moving a scalar from `from` to `to`.
///
/// Time is in milliseconds, `initial_velocity` in units per second.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spring {
    pub from: f64,
    pub to: f64,
    pub initial_velocity: f64,
    pub params: SpringParams,
}

impl Spring {
    pub fn new(from: f64, to: f64, initial_velocity: f64, params: SpringParams) -> Self {
        Self {
            from,
            to,
            initial_velocity,
            params,
        }
    }

    pub fn value_at(&self, elapsed_ms: u64) -> f64 {
        let (x, _) = self.state_at(elapsed_ms as f64 / 1000.0);
        x
    }

    /// Velocity in units per second.
    pub fn velocity_at(&self, elapsed_ms: u64) -> f64 {
        let (_, v) = self.state_at(elapsed_ms as f64 / 1000.0);
        v
    }

    pub fn is_settled(&self, elapsed_ms: u64) -> bool {
        if elapsed_ms >= MAX_SPRING_MS {
            return true;
        }
        let (x, v) = self.state_at(elapsed_ms as f64 / 1000.0);
        (x - self.to).abs() <= self.params.epsilon && v.abs() <= REST_VELOCITY
    }

    /// Position and velocity at `t` seconds.
    fn state_at(&self, t: f64) -> (f64, f64) {
        let k = self.params.stiffness;
        if k <= 0.0 {
            return (self.to, 0.0);
        }
        let beta = self.params.damping() / (2.0 * SpringParams::MASS);
        let omega0 = (k / SpringParams::MASS).sqrt();
        let x0 = self.from - self.to;
        let c = beta * x0 + self.initial_velocity;
        let envelope = (-beta * t).exp();

        // x(t) = to + e^(-βt)·f(t), x'(t) = e^(-βt)·(f'(t) - β·f(t))
        let (f, df) = if (beta - omega0).abs() <= f64::from(f32::EPSILON) {
            (x0 + c * t, c)
        } else if beta < omega0 {
            let w = (omega0 * omega0 - beta * beta).sqrt();
            let (sin, cos) = (w * t).sin_cos();
            (x0 * cos + (c / w) * sin, -x0 * w * sin + c * cos)
        } else {
            let w = (beta * beta - omega0 * omega0).sqrt();
            let (sinh, cosh) = ((w * t).sinh(), (w * t).cosh());
            (x0 * cosh + (c / w) * sinh, x0 * w * sinh + c * cosh)
        };

        let x = self.to + envelope * f;
        let v = envelope * (df - beta * f);
        if x.is_finite() && v.is_finite() {
            (x, v)
        } else {
            (self.to, 0.0)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// A fixed-duration tween between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearTween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl LinearTween {
    pub fn new(from: f64, to: f64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    pub fn sample(&self, elapsed_ms: u64) -> f64 {
        let t = (elapsed_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.sample(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrajectoryKind {
    Spring,
    Linear,
}

/// The time-driven curve behind a trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    Spring(Spring),
    Linear(LinearTween),
}

impl Curve {
    pub fn kind(&self) -> TrajectoryKind {
        match self {
            Self::Spring(_) => TrajectoryKind::Spring,
            Self::Linear(_) => TrajectoryKind::Linear,
        }
    }

    pub fn start_value(&self) -> f64 {
        match self {
            Self::Spring(s) => s.from,
            Self::Linear(t) => t.from,
        }
    }

    pub fn end_value(&self) -> f64 {
        match self {
            Self::Spring(s) => s.to,
            Self::Linear(t) => t.to,
        }
    }

    pub fn value_at(&self, elapsed_ms: u64) -> f64 {
        match self {
            Self::Spring(s) => s.value_at(elapsed_ms),
            Self::Linear(t) => t.sample(elapsed_ms),
        }
    }

    pub fn is_complete(&self, elapsed_ms: u64) -> bool {
        match self {
            Self::Spring(s) => s.is_settled(elapsed_ms),
            Self::Linear(t) => t.is_done(elapsed_ms),
        }
    }
}
