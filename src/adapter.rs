//! Translation between external parameters and plug slots
//!
//! These three functions are the holder's entire view of parameter
//! internals: what slot (if any) a descriptor maps to, how to read the
//! live value for seeding, and how to write a slot value back through
//! the parameter's own validation.

use crate::error::PlugError;
use crate::parameter::Parameter;
use crate::value::{PlugValue, ValueType};

/// The information needed to create or reuse a plug for a parameter
#[derive(Debug, Clone)]
pub struct SlotSpec {
    pub name: String,
    pub value_type: ValueType,
    pub default: PlugValue,
}

/// Maps a parameter descriptor to a slot spec, or `None` when the
/// parameter's `noHostMapping` user data suppresses the plug
pub fn slot_spec(parameter: &Parameter) -> Option<SlotSpec> {
    if parameter.no_host_mapping() {
        return None;
    }
    Some(SlotSpec {
        name: parameter.name().to_string(),
        value_type: parameter.value_type(),
        default: parameter.default_value().clone(),
    })
}

/// Reads the parameter's live value, for initial slot seeding and for
/// resynchronization after a modification scope
pub fn pull_value(parameter: &Parameter) -> PlugValue {
    parameter.value().clone()
}

/// Writes a slot value into the live parameter through its own
/// validation. On failure the parameter's prior value is untouched and
/// the error names the parameter.
pub fn push_value(parameter: &mut Parameter, value: &PlugValue) -> Result<(), PlugError> {
    parameter.set_value(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slot_spec_for_mapped_parameter() {
        let p = Parameter::new("multiply", PlugValue::Int(1));
        let spec = slot_spec(&p).expect("mapped parameter should produce a spec");
        assert_eq!(spec.name, "multiply");
        assert_eq!(spec.value_type, ValueType::Int);
        assert_eq!(spec.default, PlugValue::Int(1));
    }

    #[test]
    fn test_slot_spec_skips_no_host_mapping() {
        let p = Parameter::new("i2", PlugValue::Int(2)).with_user_data("noHostMapping", json!(true));
        assert!(slot_spec(&p).is_none());
    }

    #[test]
    fn test_push_failure_keeps_prior_value() {
        let mut p = Parameter::new("offset", PlugValue::Int(5)).with_range(0.0, 10.0);

        let err = push_value(&mut p, &PlugValue::Int(99)).unwrap_err();
        assert!(matches!(err, PlugError::Validation { ref parameter, .. } if parameter == "offset"));
        assert_eq!(pull_value(&p), PlugValue::Int(5));

        push_value(&mut p, &PlugValue::Int(7)).unwrap();
        assert_eq!(pull_value(&p), PlugValue::Int(7));
    }
}
