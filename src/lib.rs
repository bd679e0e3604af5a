//! Plugsync - parameter-to-plug synchronization for node graph hosts
//!
//! This library bridges an externally owned, dynamically described
//! parameter set onto a node's typed plugs: binding a parameterised
//! object materializes one plug per mapped parameter, a scoped
//! modification context keeps the plugs consistent with direct edits
//! to the parameters, and a validated push sweep writes plug values
//! back. Everything runs synchronously on the calling thread.

pub mod adapter;
pub mod color;
pub mod error;
pub mod holder;
pub mod observer;
pub mod parameter;
pub mod plug;
pub mod value;

// Re-export core types
pub use color::Color3;
pub use error::PlugError;
pub use holder::{ParameterModificationContext, ParameterisedHolder};
pub use observer::{ObserverId, ObserverList};
pub use parameter::{Parameter, ParameterConstraint, ParameterSet, Parameterised};
pub use plug::{Plug, PlugSet, PARAMETERS_ROOT};
pub use value::{PlugValue, ValueType};
