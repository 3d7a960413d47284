//! Position record: fixed axes `x y z e f t` plus extruder axes `e0, e1, ...`.
//!
//! Fixed axes always exist (possibly unset). Extruder axes exist only once
//! set, and `copy_from` makes the extruder set match the source exactly.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The fixed axes every position record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    E,
    F,
    T,
}

impl Axis {
    pub const ALL: [Axis; 6] = [Axis::X, Axis::Y, Axis::Z, Axis::E, Axis::F, Axis::T];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::E => "e",
            Axis::F => "f",
            Axis::T => "t",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|axis| axis.name() == s)
            .ok_or(())
    }
}

/// Parse an extruder axis key: `e` followed only by ASCII digits.
///
/// `"e0"` and `"e12"` are extruder keys; `"e"`, `"e-1"`, `"e+1"`, `"ex"`
/// and digit strings that overflow `usize` are not. Leading zeros are
/// accepted, so `"e01"` names the same axis as `"e1"`.
pub fn extruder_index(key: &str) -> Option<usize> {
    let digits = key.strip_prefix('e')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A key a position record understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKey {
    Axis(Axis),
    Extruder(usize),
}

impl FromStr for PositionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(axis) = s.parse::<Axis>() {
            return Ok(PositionKey::Axis(axis));
        }
        extruder_index(s).map(PositionKey::Extruder).ok_or(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionRecord {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    e: Option<f64>,
    f: Option<f64>,
    t: Option<f64>,
    extruders: BTreeMap<usize, Option<f64>>,
}

impl PositionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, value)` pairs. Unrecognized keys are ignored; a
    /// recognized key mapped to `None` still defines the axis.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<f64>)>,
    {
        let mut rec = Self::new();
        for (key, value) in pairs {
            rec.set(key, value);
        }
        rec
    }

    /// Set any recognized key. Returns `false` (and changes nothing) for
    /// names that are neither a fixed axis nor an extruder key.
    pub fn set(&mut self, key: &str, value: Option<f64>) -> bool {
        match key.parse::<PositionKey>() {
            Ok(PositionKey::Axis(axis)) => {
                self.set_axis(axis, value);
                true
            }
            Ok(PositionKey::Extruder(idx)) => {
                self.set_extruder(idx, value);
                true
            }
            Err(()) => false,
        }
    }

    /// Value of a recognized key. The outer `None` means the key is unknown
    /// or names an extruder axis this record does not have.
    pub fn get(&self, key: &str) -> Option<Option<f64>> {
        match key.parse::<PositionKey>().ok()? {
            PositionKey::Axis(axis) => Some(self.axis(axis)),
            PositionKey::Extruder(idx) => self.extruders.get(&idx).copied(),
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: Option<f64>) {
        *self.axis_slot(axis) = value;
    }

    pub fn axis(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::E => self.e,
            Axis::F => self.f,
            Axis::T => self.t,
        }
    }

    fn axis_slot(&mut self, axis: Axis) -> &mut Option<f64> {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::E => &mut self.e,
            Axis::F => &mut self.f,
            Axis::T => &mut self.t,
        }
    }

    /// Define (or overwrite) extruder axis `e<idx>`.
    pub fn set_extruder(&mut self, idx: usize, value: Option<f64>) {
        self.extruders.insert(idx, value);
    }

    /// Outer `None`: axis not defined. Inner `None`: defined but unset.
    pub fn extruder(&self, idx: usize) -> Option<Option<f64>> {
        self.extruders.get(&idx).copied()
    }

    /// Remove extruder axis `e<idx>`, returning its value if it existed.
    pub fn remove_extruder(&mut self, idx: usize) -> Option<Option<f64>> {
        self.extruders.remove(&idx)
    }

    /// Indices of the currently defined extruder axes, ascending.
    pub fn extruder_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.extruders.keys().copied()
    }

    /// Take every fixed axis and exactly `other`'s extruder axes.
    pub fn copy_from(&mut self, other: &PositionRecord) {
        for axis in Axis::ALL {
            self.set_axis(axis, other.axis(axis));
        }
        self.extruders.clone_from(&other.extruders);
    }

    /// Every fixed axis plus every defined extruder axis, keyed by name.
    pub fn as_dict(&self) -> BTreeMap<String, Option<f64>> {
        let mut out: BTreeMap<String, Option<f64>> = Axis::ALL
            .into_iter()
            .map(|axis| (axis.name().to_string(), self.axis(axis)))
            .collect();
        for (idx, value) in &self.extruders {
            out.insert(format!("e{idx}"), *value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extruder_key_rule() {
        assert_eq!(extruder_index("e0"), Some(0));
        assert_eq!(extruder_index("e12"), Some(12));
        assert_eq!(extruder_index("e007"), Some(7));
        assert_eq!(extruder_index("e"), None);
        assert_eq!(extruder_index("e-1"), None);
        assert_eq!(extruder_index("e+1"), None);
        assert_eq!(extruder_index("e 1"), None);
        assert_eq!(extruder_index("ex"), None);
        assert_eq!(extruder_index("x1"), None);
        assert_eq!(extruder_index("E1"), None);
        assert_eq!(extruder_index("e99999999999999999999999999"), None);
    }

    #[test]
    fn keys_parse_to_axes_or_extruders() {
        assert_eq!("z".parse::<PositionKey>(), Ok(PositionKey::Axis(Axis::Z)));
        assert_eq!("e".parse::<PositionKey>(), Ok(PositionKey::Axis(Axis::E)));
        assert_eq!("e3".parse::<PositionKey>(), Ok(PositionKey::Extruder(3)));
        assert_eq!("speed".parse::<PositionKey>(), Err(()));
    }

    #[test]
    fn set_ignores_unknown_names() {
        let mut rec = PositionRecord::new();
        assert!(!rec.set("speed", Some(1.0)));
        assert!(rec.set("f", Some(1500.0)));
        assert_eq!(rec.axis(Axis::F), Some(1500.0));
        assert_eq!(rec.as_dict().len(), 6);
    }
}
