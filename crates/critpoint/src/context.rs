//! Evaluation context: variable bindings and evaluation preferences.
//!
//! A `Context` is immutable for the duration of a search call. The search
//! symbol is bound per sample by the collaborator and always shadows a
//! binding of the same name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unit in which trigonometric arguments (and inverse-trig results) are expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degree,
    Radian,
}

impl AngleUnit {
    /// Convert an angle expressed in `self` to radians.
    #[inline]
    pub fn to_radians(self, v: f64) -> f64 {
        match self {
            AngleUnit::Degree => v.to_radians(),
            AngleUnit::Radian => v,
        }
    }

    /// Convert an angle in radians to `self`.
    #[inline]
    pub fn from_radians(self, v: f64) -> f64 {
        match self {
            AngleUnit::Degree => v.to_degrees(),
            AngleUnit::Radian => v,
        }
    }
}

/// Policy for results that leave the real line.
///
/// `Real` rejects any non-real intermediate result. `Cartesian` lets the
/// collaborator carry complex intermediates; a non-real *final* value is
/// still undefined for the scan, which samples the real plane only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexFormat {
    #[default]
    Real,
    Cartesian,
}

/// Evaluation preferences bundled for convenience.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub complex_format: ComplexFormat,
    pub angle_unit: AngleUnit,
}

impl Preferences {
    #[inline]
    pub fn new(complex_format: ComplexFormat, angle_unit: AngleUnit) -> Self {
        Self {
            complex_format,
            angle_unit,
        }
    }

    #[inline]
    pub fn radians() -> Self {
        Self::new(ComplexFormat::Real, AngleUnit::Radian)
    }
}

/// Variable bindings visible to the expression collaborator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    vars: BTreeMap<String, f64>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding; a later binding of the same name wins.
    pub fn with_var(mut self, name: impl Into<String>, value: f64) -> Self {
        self.vars.insert(name.into(), value);
        self
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}
