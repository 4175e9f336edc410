//! The traversal engine
//!
//! Walks a configuration mapping against the registry, validates each
//! capability's parameters, dispatches the generator for the installed
//! version, and attaches the resulting fragments to the output document.
//!
//! The walk itself is pure: it produces an ordered plan of
//! (container, fragment) pairs without touching the document. Attachment is
//! a single final step, so a failed compile leaves the caller's document
//! exactly as it was.

use crate::error::CompileError;
use crate::registry::{Registry, RegistryGroup, RegistryNode};
use crate::schema::Validated;
use crate::value::ConfigNode;
use crate::xml::{Document, Element};
use log::debug;

/// One fragment the walk decided to emit
#[derive(Debug, Clone)]
struct PlannedFragment {
    /// Container element under the document root, when the category has one
    container: Option<String>,
    element: Element,
}

/// Compilation engine borrowing a registry with stable version state
pub struct Engine<'r> {
    registry: &'r Registry,
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Engine { registry }
    }

    /// Compile `config` under the given entity-type root into `doc`
    ///
    /// Fragments are attached in configuration document order. On error the
    /// document is untouched.
    pub fn compile(
        &self,
        entity_type: &str,
        config: &ConfigNode,
        doc: &mut Document,
    ) -> Result<(), CompileError> {
        let root = self
            .registry
            .root(entity_type)
            .ok_or_else(|| CompileError::UnknownPath {
                path: entity_type.to_string(),
            })?;

        let mut plan = Vec::new();
        walk(root, config, entity_type, &mut plan)?;

        for fragment in plan {
            let parent = match &fragment.container {
                Some(container) => doc.root_mut().ensure_child(container),
                None => doc.root_mut(),
            };
            parent.push_child(fragment.element);
        }
        Ok(())
    }
}

/// Compile against a registry without constructing an [`Engine`]
pub fn compile(
    registry: &Registry,
    entity_type: &str,
    config: &ConfigNode,
    doc: &mut Document,
) -> Result<(), CompileError> {
    Engine::new(registry).compile(entity_type, config, doc)
}

/// Recursive planning walk over one grouping level
fn walk(
    group: &RegistryGroup,
    config: &ConfigNode,
    prefix: &str,
    plan: &mut Vec<PlannedFragment>,
) -> Result<(), CompileError> {
    let entries = config
        .as_mapping()
        .ok_or_else(|| CompileError::InvalidParameterShape {
            capability: prefix.to_string(),
            name: prefix.to_string(),
            expected: "mapping",
            actual: config.kind().to_string(),
        })?;

    for (key, value) in entries {
        let path = format!("{}.{}", prefix, key);
        match group.get(key) {
            None => {
                return Err(CompileError::UnknownCapability { path });
            }
            Some(RegistryNode::Group(sub)) => {
                // Groupings are organizational only: recurse, no fragment
                walk(sub, value, &path, plan)?;
            }
            Some(RegistryNode::Entry(entry)) => {
                plan_capability(group, entry, key, value, &path, plan)?;
            }
        }
    }
    Ok(())
}

/// Validate, version-dispatch, and plan one capability invocation
fn plan_capability(
    group: &RegistryGroup,
    entry: &crate::entry::Entry,
    key: &str,
    value: &ConfigNode,
    path: &str,
    plan: &mut Vec<PlannedFragment>,
) -> Result<(), CompileError> {
    // Explicit `false` means intentionally disabled. Checked before band
    // resolution so disabling never trips version errors.
    if value.as_bool() == Some(false) {
        debug!("{}: explicitly disabled, skipping", path);
        return Ok(());
    }

    let band = match entry.resolve(path)? {
        Some(band) => band,
        None => {
            debug!("{}: no installed version, not offered, skipping", path);
            return Ok(());
        }
    };

    let params = match band.schema().validate(key, value)? {
        Validated::Params(params) => params,
        Validated::Disabled => {
            debug!("{}: explicitly disabled, skipping", path);
            return Ok(());
        }
    };

    let element = band.generate(&params);
    debug!(
        "{}: generated <{}> for version {}",
        path,
        element.name(),
        entry
            .installed_version()
            .map(|v| v.to_string())
            .unwrap_or_default()
    );
    plan.push(PlannedFragment {
        container: group.container_element().map(str::to_string),
        element,
    });
    Ok(())
}
