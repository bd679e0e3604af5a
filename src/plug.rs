//! Plugs - named typed value slots exposed by a node

use crate::error::PlugError;
use crate::observer::ObserverList;
use crate::value::{PlugValue, ValueType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fixed top-level name under which bound plugs are exposed
pub const PARAMETERS_ROOT: &str = "parameters";

/// A named, typed, defaulted value cell on a node.
///
/// The declared type is captured from the default value at creation and
/// never changes; assigning a value of any other type fails with
/// `TypeMismatch`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Plug {
    name: String,
    value_type: ValueType,
    default: PlugValue,
    value: PlugValue,
    #[serde(skip)]
    observers: ObserverList,
}

impl Plug {
    /// Creates a plug whose type is taken from `default`, with the
    /// current value seeded to the default
    pub fn new(name: impl Into<String>, default: PlugValue) -> Self {
        Self {
            name: name.into(),
            value_type: default.value_type(),
            value: default.clone(),
            default,
            observers: ObserverList::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The immutable default captured at creation
    pub fn default_value(&self) -> &PlugValue {
        &self.default
    }

    /// Returns the current value. Never fails.
    pub fn get(&self) -> &PlugValue {
        &self.value
    }

    /// Replaces the current value and notifies observers.
    ///
    /// Every successful set notifies, including sets of an equal value;
    /// hosts that care can debounce on their side.
    pub fn set(&mut self, value: PlugValue) -> Result<(), PlugError> {
        self.check_type(&value)?;
        self.value = value;
        self.observers.notify(&self.name, &self.value);
        Ok(())
    }

    /// Replaces the current value without notifying observers
    pub fn set_silent(&mut self, value: PlugValue) -> Result<(), PlugError> {
        self.check_type(&value)?;
        self.value = value;
        Ok(())
    }

    pub fn observers(&self) -> &ObserverList {
        &self.observers
    }

    pub fn observers_mut(&mut self) -> &mut ObserverList {
        &mut self.observers
    }

    /// Replaces the default on a reused plug during rebind. Callers
    /// guarantee the incoming default matches the declared type.
    pub(crate) fn reset_default(&mut self, default: PlugValue) {
        debug_assert_eq!(default.value_type(), self.value_type);
        self.default = default;
    }

    fn check_type(&self, value: &PlugValue) -> Result<(), PlugError> {
        if value.value_type() != self.value_type {
            return Err(PlugError::TypeMismatch {
                name: self.name.clone(),
                expected: self.value_type.name(),
                actual: value.value_type().name(),
            });
        }
        Ok(())
    }
}

impl Clone for Plug {
    fn clone(&self) -> Self {
        // Observers are tied to the original plug and are not cloned
        Self {
            name: self.name.clone(),
            value_type: self.value_type,
            default: self.default.clone(),
            value: self.value.clone(),
            observers: ObserverList::new(),
        }
    }
}

/// The ordered collection of plugs a holder exposes for external
/// read/write, under the fixed top-level name `"parameters"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlugSet {
    name: String,
    plugs: IndexMap<String, Plug>,
}

impl PlugSet {
    /// Creates an empty plug set
    pub fn new() -> Self {
        Self {
            name: PARAMETERS_ROOT.to_string(),
            plugs: IndexMap::new(),
        }
    }

    /// The top-level name the set is exposed under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a plug, replacing and returning any previous plug of
    /// the same name
    pub fn insert(&mut self, plug: Plug) -> Option<Plug> {
        self.plugs.insert(plug.name().to_string(), plug)
    }

    /// Removes and returns a plug, preserving the order of the rest
    pub fn take(&mut self, name: &str) -> Option<Plug> {
        self.plugs.shift_remove(name)
    }

    /// Looks up a plug by name. Names that were never bound, or were
    /// skipped via `noHostMapping`, report `Missing`.
    pub fn plug(&self, name: &str) -> Result<&Plug, PlugError> {
        self.plugs.get(name).ok_or_else(|| PlugError::Missing {
            name: name.to_string(),
        })
    }

    /// Mutable variant of [`PlugSet::plug`]
    pub fn plug_mut(&mut self, name: &str) -> Result<&mut Plug, PlugError> {
        self.plugs.get_mut(name).ok_or_else(|| PlugError::Missing {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.plugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugs.is_empty()
    }

    /// Iterates plugs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Plug)> {
        self.plugs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Plug)> {
        self.plugs.iter_mut()
    }
}

impl Default for PlugSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_plug_type_from_default() {
        let plug = Plug::new("multiply", PlugValue::Int(1));
        assert_eq!(plug.value_type(), ValueType::Int);
        assert_eq!(plug.default_value(), &PlugValue::Int(1));
        assert_eq!(plug.get(), &PlugValue::Int(1));
    }

    #[test]
    fn test_set_rejects_wrong_type() {
        let mut plug = Plug::new("multiply", PlugValue::Int(1));
        let err = plug.set(PlugValue::from("oops")).unwrap_err();
        assert_eq!(
            err,
            PlugError::TypeMismatch {
                name: "multiply".to_string(),
                expected: "Int",
                actual: "String",
            }
        );
        // Failed set leaves the value untouched
        assert_eq!(plug.get(), &PlugValue::Int(1));
    }

    #[test]
    fn test_set_notifies_observers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut plug = Plug::new("dst", PlugValue::from(""));

        let seen_clone = seen.clone();
        plug.observers_mut().register(move |name, value| {
            seen_clone.borrow_mut().push((name.to_string(), value.clone()));
        });

        plug.set(PlugValue::from("/tmp/s.####.exr")).unwrap();
        plug.set_silent(PlugValue::from("quiet")).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![("dst".to_string(), PlugValue::from("/tmp/s.####.exr"))]
        );
        assert_eq!(plug.get(), &PlugValue::from("quiet"));
    }

    #[test]
    fn test_default_survives_sets() {
        let mut plug = Plug::new("offset", PlugValue::Int(0));
        plug.set(PlugValue::Int(42)).unwrap();
        assert_eq!(plug.default_value(), &PlugValue::Int(0));
    }

    #[test]
    fn test_plug_set_lookup() {
        let mut plugs = PlugSet::new();
        assert_eq!(plugs.name(), PARAMETERS_ROOT);

        plugs.insert(Plug::new("src", PlugValue::from("")));
        plugs.insert(Plug::new("multiply", PlugValue::Int(1)));

        assert!(plugs.plug("src").is_ok());
        assert_eq!(
            plugs.plug("absent").unwrap_err(),
            PlugError::Missing {
                name: "absent".to_string()
            }
        );

        let names: Vec<&str> = plugs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["src", "multiply"]);
    }

    #[test]
    fn test_take_preserves_order() {
        let mut plugs = PlugSet::new();
        plugs.insert(Plug::new("a", PlugValue::Int(0)));
        plugs.insert(Plug::new("b", PlugValue::Int(0)));
        plugs.insert(Plug::new("c", PlugValue::Int(0)));

        assert!(plugs.take("b").is_some());
        let names: Vec<&str> = plugs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
