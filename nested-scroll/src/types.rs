use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub};
use core::str::FromStr;

use crate::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

/// A pair of scalars, one per axis (positions, deltas, offsets, velocities).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.set(axis, value);
        self
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Direction of a signed gesture delta.
///
/// Negative deltas are `Forward`: a finger moving up advances the content (the scroll offset
/// grows). Positive deltas are `Backward`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Returns `None` for zero (and non-finite) deltas.
    pub fn of_delta(delta: f64) -> Option<Self> {
        if !delta.is_finite() || delta == 0.0 {
            None
        } else if delta < 0.0 {
            Some(Self::Forward)
        } else {
            Some(Self::Backward)
        }
    }
}

/// How a surface shares a delta with its nesting parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ScrollMode {
    /// The surface consumes everything; nothing escalates.
    SelfOnly,
    /// The surface consumes up to its extent; the remainder escalates.
    #[default]
    SelfFirst,
    /// The parent chain is offered the full delta before the surface consumes anything.
    ParentFirst,
}

impl ScrollMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfOnly => "SELF_ONLY",
            Self::SelfFirst => "SELF_FIRST",
            Self::ParentFirst => "PARENT_FIRST",
        }
    }

    /// Parses a scroll mode, resolving unknown values to [`ScrollMode::SelfFirst`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.parse() {
            Ok(mode) => mode,
            Err(_err) => {
                swarn!(error = %_err, "falling back to SELF_FIRST");
                Self::SelfFirst
            }
        }
    }
}

impl fmt::Display for ScrollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `SELF_ONLY`, `selfOnly`, `self-only` and similar spellings (case-insensitive).
impl FromStr for ScrollMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "selfonly" => Ok(Self::SelfOnly),
            "selffirst" => Ok(Self::SelfFirst),
            "parentfirst" => Ok(Self::ParentFirst),
            _ => Err(ConfigError::UnknownScrollMode(s.to_owned())),
        }
    }
}

/// Which axes a surface is allowed to scroll on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisLock {
    #[default]
    Vertical,
    Horizontal,
    Both,
}

impl AxisLock {
    pub fn allows(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (Self::Both, _) | (Self::Vertical, Axis::Y) | (Self::Horizontal, Axis::X)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Both => "both",
        }
    }
}

impl FromStr for AxisLock {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "vertical" | "column" => Ok(Self::Vertical),
            "horizontal" | "row" => Ok(Self::Horizontal),
            "both" => Ok(Self::Both),
            _ => Err(ConfigError::UnknownAxisLock(s.to_owned())),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Where a delta comes from.
///
/// Parents only accept fling deltas from children under the fling eligibility rule, and
/// programmatic deltas never leave the surface they target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputKind {
    Touch,
    Fling,
    Programmatic,
}

/// A generational handle to a surface attached to a [`crate::ScrollEngine`].
///
/// Handles of detached surfaces are never reused with the same generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}v{}", self.index, self.generation)
    }
}

/// Identifies one touch pointer stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);
