//! Temperature record: per-tool, bed, and chamber (actual, target) pairs.
//!
//! Every setter merges into the stored pair: a `None` argument keeps the
//! previous value of that slot. The record is a passive container; it never
//! fails and never logs.

use std::collections::BTreeMap;

use serde::Serialize;

/// One heated zone's reading. Either slot may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TemperaturePair {
    pub actual: Option<f64>,
    pub target: Option<f64>,
}

impl TemperaturePair {
    pub const UNSET: Self = Self {
        actual: None,
        target: None,
    };

    pub fn new(actual: Option<f64>, target: Option<f64>) -> Self {
        Self { actual, target }
    }

    /// Pair merge: each set argument replaces its slot, unset arguments keep the old value.
    pub fn merged(self, actual: Option<f64>, target: Option<f64>) -> Self {
        Self {
            actual: actual.or(self.actual),
            target: target.or(self.target),
        }
    }
}

impl From<(Option<f64>, Option<f64>)> for TemperaturePair {
    fn from((actual, target): (Option<f64>, Option<f64>)) -> Self {
        Self { actual, target }
    }
}

/// Tool index as reported by the printer (`T0`, `T1`, ...).
pub type ToolId = usize;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureRecord {
    tools: BTreeMap<ToolId, TemperaturePair>,
    bed: TemperaturePair,
    chamber: TemperaturePair,
}

impl TemperatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a reading for `tool`. Calling with both slots unset still
    /// creates an `UNSET` entry for a tool never seen before.
    pub fn set_tool(&mut self, tool: ToolId, actual: Option<f64>, target: Option<f64>) {
        let entry = self.tools.entry(tool).or_default();
        *entry = entry.merged(actual, target);
    }

    pub fn set_bed(&mut self, actual: Option<f64>, target: Option<f64>) {
        self.bed = self.bed.merged(actual, target);
    }

    pub fn set_chamber(&mut self, actual: Option<f64>, target: Option<f64>) {
        self.chamber = self.chamber.merged(actual, target);
    }

    /// Independent copy of every tool reading.
    pub fn tools(&self) -> BTreeMap<ToolId, TemperaturePair> {
        self.tools.clone()
    }

    /// `None` if the tool was never set.
    pub fn tool(&self, tool: ToolId) -> Option<TemperaturePair> {
        self.tools.get(&tool).copied()
    }

    pub fn bed(&self) -> TemperaturePair {
        self.bed
    }

    pub fn chamber(&self) -> TemperaturePair {
        self.chamber
    }

    /// Replace every reading with `other`'s.
    pub fn copy_from(&mut self, other: &TemperatureRecord) {
        self.tools = other.tools();
        self.bed = other.bed;
        self.chamber = other.chamber;
    }

    /// Long-form view: `tool<N>`, `bed`, `chamber`.
    pub fn as_dict(&self) -> BTreeMap<String, TemperaturePair> {
        let mut out: BTreeMap<String, TemperaturePair> = self
            .tools
            .iter()
            .map(|(tool, pair)| (format!("tool{tool}"), *pair))
            .collect();
        out.insert("bed".to_string(), self.bed);
        out.insert("chamber".to_string(), self.chamber);
        out
    }

    /// `as_dict()` plus the short keys scripts use: `<N>` per tool, `b` and `c`.
    pub fn as_script_dict(&self) -> BTreeMap<String, TemperaturePair> {
        let mut out = self.as_dict();
        for (tool, pair) in &self.tools {
            out.insert(tool.to_string(), *pair);
        }
        out.insert("b".to_string(), self.bed);
        out.insert("c".to_string(), self.chamber);
        out
    }
}
