//! External parameter sets owned by a procedural operation
//!
//! A `Parameterised` object owns an ordered set of typed, validated
//! parameters. The holder only ever reads the set at bind time and
//! writes back through validated sets; the set's structure belongs to
//! its owner.

use crate::error::PlugError;
use crate::value::{PlugValue, ValueType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Validation constraint carried by a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterConstraint {
    /// Any value of the declared type is accepted
    None,
    /// Inclusive numeric range, for `Int` and `Float` parameters
    Range { min: f64, max: f64 },
    /// Enum-style constraint: the value must equal one of the presets
    Presets(Vec<PlugValue>),
}

/// An externally defined, typed, named, validated value descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    description: String,
    value_type: ValueType,
    default_value: PlugValue,
    value: PlugValue,
    constraint: ParameterConstraint,
    user_data: serde_json::Value,
}

impl Parameter {
    /// Creates a parameter whose type is taken from `default`, with
    /// the live value seeded to the default
    pub fn new(name: impl Into<String>, default: PlugValue) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            value_type: default.value_type(),
            value: default.clone(),
            default_value: default,
            constraint: ParameterConstraint::None,
            user_data: serde_json::json!({}),
        }
    }

    /// Add a description to the parameter
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Constrain a numeric parameter to an inclusive range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.constraint = ParameterConstraint::Range { min, max };
        self
    }

    /// Constrain the parameter to a fixed set of preset values
    pub fn with_presets(mut self, presets: Vec<PlugValue>) -> Self {
        self.constraint = ParameterConstraint::Presets(presets);
        self
    }

    /// Attach a user-data entry (e.g. the `noHostMapping` flag)
    pub fn with_user_data(mut self, key: &str, value: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = &mut self.user_data {
            map.insert(key.to_string(), value);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn default_value(&self) -> &PlugValue {
        &self.default_value
    }

    /// The parameter's live value
    pub fn value(&self) -> &PlugValue {
        &self.value
    }

    pub fn constraint(&self) -> &ParameterConstraint {
        &self.constraint
    }

    pub fn user_data(&self) -> &serde_json::Value {
        &self.user_data
    }

    /// Whether this parameter opted out of plug mapping. Only a
    /// boolean `true` suppresses the plug; absent or false maps.
    pub fn no_host_mapping(&self) -> bool {
        self.user_data
            .get("noHostMapping")
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false)
    }

    /// Checks a candidate value against the declared type and the
    /// constraint, without storing it
    pub fn validate(&self, value: &PlugValue) -> Result<(), PlugError> {
        if value.value_type() != self.value_type {
            return Err(PlugError::TypeMismatch {
                name: self.name.clone(),
                expected: self.value_type.name(),
                actual: value.value_type().name(),
            });
        }

        match &self.constraint {
            ParameterConstraint::None => Ok(()),
            ParameterConstraint::Range { min, max } => {
                // Range only constrains scalar numerics
                if let Some(numeric) = value.as_f64() {
                    if numeric < *min || numeric > *max {
                        return Err(PlugError::Validation {
                            parameter: self.name.clone(),
                            reason: format!("{} is outside the range [{}, {}]", numeric, min, max),
                        });
                    }
                }
                Ok(())
            }
            ParameterConstraint::Presets(presets) => {
                if presets.contains(value) {
                    Ok(())
                } else {
                    Err(PlugError::Validation {
                        parameter: self.name.clone(),
                        reason: "value is not one of the presets".to_string(),
                    })
                }
            }
        }
    }

    /// Validates and stores a new live value. On failure the prior
    /// value is untouched.
    pub fn set_value(&mut self, value: PlugValue) -> Result<(), PlugError> {
        self.validate(&value)?;
        self.value = value;
        Ok(())
    }
}

/// Ordered mapping from name to parameter; iteration order is
/// declaration order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterSet {
    parameters: IndexMap<String, Parameter>,
}

impl ParameterSet {
    /// Creates an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, replacing any existing parameter of the
    /// same name in place
    pub fn add(&mut self, parameter: Parameter) {
        self.parameters
            .insert(parameter.name().to_string(), parameter);
    }

    /// Appends several parameters in order
    pub fn add_parameters(&mut self, parameters: Vec<Parameter>) {
        for parameter in parameters {
            self.add(parameter);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.parameters.keys()
    }

    /// Iterates parameters in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Parameter)> {
        self.parameters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Parameter)> {
        self.parameters.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// The procedural-operation object owning a parameter set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameterised {
    type_name: String,
    parameters: ParameterSet,
}

impl Parameterised {
    /// Creates a parameterised object with an empty parameter set
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            parameters: ParameterSet::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_defaults() {
        let p = Parameter::new("multiply", PlugValue::Int(1)).with_description("scale factor");
        assert_eq!(p.value_type(), ValueType::Int);
        assert_eq!(p.default_value(), &PlugValue::Int(1));
        assert_eq!(p.value(), &PlugValue::Int(1));
        assert_eq!(p.description(), "scale factor");
        assert!(!p.no_host_mapping());
    }

    #[test]
    fn test_range_validation() {
        let mut p = Parameter::new("offset", PlugValue::Int(0)).with_range(0.0, 100.0);

        assert!(p.set_value(PlugValue::Int(100)).is_ok());
        let err = p.set_value(PlugValue::Int(101)).unwrap_err();
        assert!(matches!(err, PlugError::Validation { ref parameter, .. } if parameter == "offset"));

        // Prior value untouched by the failed set
        assert_eq!(p.value(), &PlugValue::Int(100));
    }

    #[test]
    fn test_preset_validation() {
        let mut p = Parameter::new("mode", PlugValue::from("over"))
            .with_presets(vec![PlugValue::from("over"), PlugValue::from("under")]);

        assert!(p.set_value(PlugValue::from("under")).is_ok());
        assert!(matches!(
            p.set_value(PlugValue::from("sideways")),
            Err(PlugError::Validation { .. })
        ));
    }

    #[test]
    fn test_type_validation() {
        let mut p = Parameter::new("src", PlugValue::from(""));
        assert!(matches!(
            p.set_value(PlugValue::Int(1)),
            Err(PlugError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_no_host_mapping_flag() {
        let unflagged = Parameter::new("i1", PlugValue::Int(1));
        let flagged_false =
            Parameter::new("i2", PlugValue::Int(2)).with_user_data("noHostMapping", json!(false));
        let flagged_true =
            Parameter::new("i3", PlugValue::Int(3)).with_user_data("noHostMapping", json!(true));
        let non_boolean =
            Parameter::new("i4", PlugValue::Int(4)).with_user_data("noHostMapping", json!("yes"));

        assert!(!unflagged.no_host_mapping());
        assert!(!flagged_false.no_host_mapping());
        assert!(flagged_true.no_host_mapping());
        assert!(!non_boolean.no_host_mapping());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let mut set = ParameterSet::new();
        set.add_parameters(vec![
            Parameter::new("src", PlugValue::from("")),
            Parameter::new("dst", PlugValue::from("")),
            Parameter::new("multiply", PlugValue::Int(1)),
        ]);

        let names: Vec<&str> = set.names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["src", "dst", "multiply"]);
    }
}
