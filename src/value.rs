//! Tagged values flowing between parameters and plugs

use crate::color::Color3;
use serde::{Deserialize, Serialize};

/// Type tag for plug and parameter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
    Color,
    BoolVector,
    IntVector,
    FloatVector,
    StringVector,
}

impl ValueType {
    /// Get a human-readable name for this value type
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "Bool",
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::String => "String",
            ValueType::Color => "Color",
            ValueType::BoolVector => "BoolVector",
            ValueType::IntVector => "IntVector",
            ValueType::FloatVector => "FloatVector",
            ValueType::StringVector => "StringVector",
        }
    }
}

/// A dynamically typed value carried by a plug or parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlugValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
    Color(Color3),
    BoolVector(Vec<bool>),
    IntVector(Vec<i32>),
    FloatVector(Vec<f32>),
    StringVector(Vec<String>),
}

impl PlugValue {
    /// The type tag of the carried value
    pub fn value_type(&self) -> ValueType {
        match self {
            PlugValue::Bool(_) => ValueType::Bool,
            PlugValue::Int(_) => ValueType::Int,
            PlugValue::Float(_) => ValueType::Float,
            PlugValue::String(_) => ValueType::String,
            PlugValue::Color(_) => ValueType::Color,
            PlugValue::BoolVector(_) => ValueType::BoolVector,
            PlugValue::IntVector(_) => ValueType::IntVector,
            PlugValue::FloatVector(_) => ValueType::FloatVector,
            PlugValue::StringVector(_) => ValueType::StringVector,
        }
    }

    /// Numeric view of scalar values, used for range checks
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PlugValue::Int(i) => Some(*i as f64),
            PlugValue::Float(f) => Some(*f as f64),
            _ => None,
        }
    }
}

impl From<bool> for PlugValue {
    fn from(v: bool) -> Self {
        PlugValue::Bool(v)
    }
}

impl From<i32> for PlugValue {
    fn from(v: i32) -> Self {
        PlugValue::Int(v)
    }
}

impl From<f32> for PlugValue {
    fn from(v: f32) -> Self {
        PlugValue::Float(v)
    }
}

impl From<&str> for PlugValue {
    fn from(v: &str) -> Self {
        PlugValue::String(v.to_string())
    }
}

impl From<String> for PlugValue {
    fn from(v: String) -> Self {
        PlugValue::String(v)
    }
}

impl From<Color3> for PlugValue {
    fn from(v: Color3) -> Self {
        PlugValue::Color(v)
    }
}

impl From<Vec<bool>> for PlugValue {
    fn from(v: Vec<bool>) -> Self {
        PlugValue::BoolVector(v)
    }
}

impl From<Vec<i32>> for PlugValue {
    fn from(v: Vec<i32>) -> Self {
        PlugValue::IntVector(v)
    }
}

impl From<Vec<f32>> for PlugValue {
    fn from(v: Vec<f32>) -> Self {
        PlugValue::FloatVector(v)
    }
}

impl From<Vec<String>> for PlugValue {
    fn from(v: Vec<String>) -> Self {
        PlugValue::StringVector(v)
    }
}
