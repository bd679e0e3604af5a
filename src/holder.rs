//! The parameterised holder - a node keeping plugs and parameters in sync
//!
//! A holder reflects an externally owned parameter set onto a set of
//! typed plugs. Binding materializes one plug per mapped parameter;
//! edits flow back through a validated push sweep, and a scoped
//! modification context guarantees the plugs are resynchronized after
//! the external object is mutated directly.

use crate::adapter;
use crate::error::PlugError;
use crate::parameter::Parameterised;
use crate::plug::{Plug, PlugSet, PARAMETERS_ROOT};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Node holding a parameterised object and the plugs derived from it.
///
/// The holder shares ownership of the parameterised object but never
/// destroys it or changes its structure; structure belongs to the
/// external owner, and structural changes require a rebind.
#[derive(Debug)]
pub struct ParameterisedHolder {
    parameterised: Option<Rc<RefCell<Parameterised>>>,
    class_name: String,
    class_version: i32,
    search_path: String,
    plugs: PlugSet,
}

impl ParameterisedHolder {
    /// Creates an empty holder with no parameterised object bound
    pub fn new() -> Self {
        Self {
            parameterised: None,
            class_name: String::new(),
            class_version: -1,
            search_path: String::new(),
            plugs: PlugSet::new(),
        }
    }

    /// Binds a parameterised object without class loader information
    pub fn set_parameterised(&mut self, parameterised: Rc<RefCell<Parameterised>>) {
        self.set_parameterised_with_class(parameterised, "", -1, "");
    }

    /// Binds a parameterised object along with the class name, version
    /// and search path it was loaded from.
    ///
    /// Walks the parameter set in declaration order, creating one plug
    /// per parameter and seeding it from the parameter's live value.
    /// Parameters flagged `noHostMapping` are skipped. A plug from a
    /// previous bind is reused (keeping its observers) when its name
    /// and type match; all other existing plugs are discarded.
    pub fn set_parameterised_with_class(
        &mut self,
        parameterised: Rc<RefCell<Parameterised>>,
        class_name: &str,
        class_version: i32,
        search_path: &str,
    ) {
        let mut plugs = PlugSet::new();
        let mut skipped = 0usize;

        {
            let borrowed = parameterised.borrow();
            for (_, parameter) in borrowed.parameters().iter() {
                let Some(spec) = adapter::slot_spec(parameter) else {
                    skipped += 1;
                    continue;
                };

                let mut plug = match self.plugs.take(&spec.name) {
                    Some(mut existing) if existing.value_type() == spec.value_type => {
                        existing.reset_default(spec.default);
                        existing
                    }
                    _ => Plug::new(spec.name.clone(), spec.default.clone()),
                };

                // The seed comes from the same parameter the type came
                // from, so this set cannot mismatch
                if let Err(err) = plug.set(adapter::pull_value(parameter)) {
                    warn!("failed to seed plug from parameter: {}", err);
                }
                plugs.insert(plug);
            }

            debug!(
                "bound \"{}\": {} parameters, {} plugs, {} skipped",
                borrowed.type_name(),
                borrowed.parameters().len(),
                plugs.len(),
                skipped
            );
        }

        self.plugs = plugs;
        self.parameterised = Some(parameterised);
        self.class_name = class_name.to_string();
        self.class_version = class_version;
        self.search_path = search_path.to_string();
    }

    /// Returns the bound parameterised object and its class loader
    /// information, or the sentinel `(None, "", -1, "")` when empty
    pub fn get_parameterised(&self) -> (Option<Rc<RefCell<Parameterised>>>, &str, i32, &str) {
        (
            self.parameterised.clone(),
            &self.class_name,
            self.class_version,
            &self.search_path,
        )
    }

    /// The plugs exposed under the `"parameters"` root
    pub fn plugs(&self) -> &PlugSet {
        &self.plugs
    }

    pub fn plugs_mut(&mut self) -> &mut PlugSet {
        &mut self.plugs
    }

    /// Looks up a bound plug by name
    pub fn plug(&self, name: &str) -> Result<&Plug, PlugError> {
        self.plugs.plug(name)
    }

    /// Pushes every plug value into its parameter, in plug order.
    ///
    /// Each parameter validates the incoming value itself. The first
    /// validation failure aborts the sweep and is returned with the
    /// offending parameter's name; parameters pushed before the
    /// failure keep their new values. A holder with nothing bound is a
    /// no-op.
    pub fn set_parameterised_values(&mut self) -> Result<(), PlugError> {
        let Some(parameterised) = self.parameterised.clone() else {
            return Ok(());
        };

        let mut borrowed = parameterised.borrow_mut();
        debug!("pushing {} plug values", self.plugs.len());
        for (name, plug) in self.plugs.iter() {
            let Some(parameter) = borrowed.parameters_mut().get_mut(name) else {
                continue;
            };
            adapter::push_value(parameter, plug.get())?;
        }
        Ok(())
    }

    /// Pulls every parameter value into its plug, notifying plug
    /// observers. This is the resynchronization a modification context
    /// performs on exit; it is public so hosts can force a refresh.
    ///
    /// If the parameterised object is still mutably borrowed the plugs
    /// are left stale and a warning is logged; the modification guard
    /// relies on this never panicking.
    pub fn set_plug_values(&mut self) -> Result<(), PlugError> {
        let Some(parameterised) = self.parameterised.clone() else {
            return Ok(());
        };

        let borrowed = match parameterised.try_borrow() {
            Ok(borrowed) => borrowed,
            Err(_) => {
                warn!("parameterised object still borrowed; plug values left stale");
                return Ok(());
            }
        };

        for (name, plug) in self.plugs.iter_mut() {
            if let Some(parameter) = borrowed.parameters().get(name) {
                plug.set(adapter::pull_value(parameter))?;
            }
        }
        Ok(())
    }

    /// Opens a scoped modification window on the bound parameterised
    /// object. When the returned context drops - on normal exit, early
    /// return or unwinding - every plug is resynchronized from the
    /// parameter set exactly once.
    pub fn parameter_modification_context(&mut self) -> ParameterModificationContext<'_> {
        ParameterModificationContext { holder: self }
    }

    /// Closure convenience over [`parameter_modification_context`]:
    /// runs `f` with mutable access to the parameterised object, then
    /// resynchronizes the plugs whether or not `f` succeeded. Fails
    /// with `Missing` when nothing is bound.
    ///
    /// [`parameter_modification_context`]: ParameterisedHolder::parameter_modification_context
    pub fn with_parameter_modification<T, F>(&mut self, f: F) -> Result<T, PlugError>
    where
        F: FnOnce(&mut Parameterised) -> Result<T, PlugError>,
    {
        let context = self.parameter_modification_context();
        let parameterised = context.parameterised().ok_or_else(|| PlugError::Missing {
            name: PARAMETERS_ROOT.to_string(),
        })?;
        // The RefMut must be released before `context` drops, so the
        // closure result is bound to a local rather than returned as a
        // tail expression
        let result = f(&mut parameterised.borrow_mut());
        result
    }
}

impl Default for ParameterisedHolder {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for a scoped parameter modification.
///
/// Holds exclusive access to the holder for the duration of the scope;
/// dropping it resynchronizes every plug from the parameter set. The
/// caller must release any `RefMut` it took on the parameterised
/// object before the guard drops.
#[derive(Debug)]
pub struct ParameterModificationContext<'a> {
    holder: &'a mut ParameterisedHolder,
}

impl ParameterModificationContext<'_> {
    /// The live parameterised object, for direct mutation inside the
    /// scope
    pub fn parameterised(&self) -> Option<Rc<RefCell<Parameterised>>> {
        self.holder.parameterised.clone()
    }
}

impl Drop for ParameterModificationContext<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.holder.set_plug_values() {
            warn!(
                "plug resynchronization after parameter modification failed: {}",
                err
            );
        }
    }
}
