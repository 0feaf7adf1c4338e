use crate::error::{Result, StratoptError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Numeric kind of a tunable parameter. `Real` values are rounded to
/// `decimals` after every arithmetic step so map equality stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamKind {
    Integer,
    Real { decimals: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Ordered parameter mapping; BTreeMap keys give a deterministic canonical
/// JSON signature for duplicate rejection.
pub type ParameterMap = BTreeMap<String, ParamValue>;

pub fn canonical_signature(parameters: &ParameterMap) -> String {
    serde_json::to_string(parameters).unwrap_or_default()
}

/// Static descriptor of one tunable parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    /// Human-readable label for display.
    pub label: String,
    pub kind: ParamKind,
    pub min: f64,
    pub max: f64,
}

impl ParamDescriptor {
    pub fn integer(name: &str, label: &str, min: i64, max: i64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::Integer,
            min: min as f64,
            max: max as f64,
        }
    }

    pub fn real(name: &str, label: &str, min: f64, max: f64, decimals: u32) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::Real { decimals },
            min,
            max,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StratoptError::Configuration(
                "Parameter name must not be empty".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(StratoptError::Configuration(format!(
                "Parameter '{}' has min {} > max {}",
                self.name, self.min, self.max
            )));
        }
        Ok(())
    }

    /// Uniform random value within bounds, with kind-correct rounding.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParamValue {
        match self.kind {
            ParamKind::Integer => ParamValue::Int(rng.gen_range(self.min as i64..=self.max as i64)),
            ParamKind::Real { decimals } => {
                ParamValue::Float(round_to(rng.gen_range(self.min..=self.max), decimals))
            }
        }
    }

    /// Force an arbitrary candidate back into the descriptor's domain:
    /// integers truncate toward zero, reals round to `decimals`, both clamp
    /// inclusively to `[min, max]`.
    pub fn cast_clamp(&self, raw: f64) -> ParamValue {
        match self.kind {
            ParamKind::Integer => {
                let value = (raw.trunc() as i64).clamp(self.min as i64, self.max as i64);
                ParamValue::Int(value)
            }
            ParamKind::Real { decimals } => {
                let value = round_to(raw, decimals).clamp(self.min, self.max);
                ParamValue::Float(value)
            }
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Validated, immutable table of parameter descriptors for one strategy.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    descriptors: Vec<ParamDescriptor>,
}

impl ParameterSpace {
    pub fn new(descriptors: Vec<ParamDescriptor>) -> Result<Self> {
        if descriptors.is_empty() {
            return Err(StratoptError::Configuration(
                "Parameter space must contain at least one parameter".to_string(),
            ));
        }
        for descriptor in &descriptors {
            descriptor.validate()?;
        }
        Ok(Self { descriptors })
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.descriptors
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name.as_str())
    }

    pub fn descriptor(&self, name: &str) -> Option<&ParamDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// One uniform random point in the space.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParameterMap {
        self.descriptors
            .iter()
            .map(|d| (d.name.clone(), d.sample(rng)))
            .collect()
    }

    /// True when every value satisfies its descriptor's bounds and kind.
    pub fn contains(&self, parameters: &ParameterMap) -> bool {
        self.descriptors.iter().all(|d| {
            parameters.get(&d.name).is_some_and(|value| match (d.kind, value) {
                (ParamKind::Integer, ParamValue::Int(v)) => {
                    *v >= d.min as i64 && *v <= d.max as i64
                }
                (ParamKind::Real { .. }, ParamValue::Float(v)) => *v >= d.min && *v <= d.max,
                _ => false,
            })
        })
    }
}
