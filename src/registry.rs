//! The capability registry
//!
//! An ordered, hierarchical mapping from entity type ("job") through
//! category groups ("wrappers", "triggers") down to [`Entry`] leaves. The
//! shape is fixed after construction; the only mutation is recording or
//! clearing installed versions, which backend introspection and tests use.

use crate::entry::Entry;
use crate::error::CompileError;
use crate::version::Version;

/// A node in the registry tree
#[derive(Debug, Clone)]
pub enum RegistryNode {
    /// Organizational grouping; no fragment of its own
    Group(RegistryGroup),
    /// A leaf capability
    Entry(Entry),
}

/// A grouping level: ordered children plus the XML container element its
/// capabilities attach under (absent means attach directly to the root)
#[derive(Debug, Clone, Default)]
pub struct RegistryGroup {
    container: Option<String>,
    children: Vec<(String, RegistryNode)>,
}

impl RegistryGroup {
    pub fn new() -> Self {
        RegistryGroup::default()
    }

    /// Set the container element fragments in this group attach under
    pub fn container(mut self, element: &str) -> Self {
        self.container = Some(element.to_string());
        self
    }

    /// Register a capability under its name
    pub fn entry(mut self, key: &str, entry: Entry) -> Self {
        self.children
            .push((key.to_string(), RegistryNode::Entry(entry)));
        self
    }

    /// Register a nested group
    pub fn group(mut self, key: &str, group: RegistryGroup) -> Self {
        self.children
            .push((key.to_string(), RegistryNode::Group(group)));
        self
    }

    pub fn container_element(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&RegistryNode> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut RegistryNode> {
        self.children
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Children in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryNode)> {
        self.children.iter().map(|(k, node)| (k.as_str(), node))
    }

    fn clear_versions(&mut self) {
        for (_, node) in &mut self.children {
            match node {
                RegistryNode::Entry(entry) => entry.clear(),
                RegistryNode::Group(group) => group.clear_versions(),
            }
        }
    }
}

/// Result of a registry path lookup
#[derive(Debug)]
pub enum Lookup<'a> {
    Entry(&'a Entry),
    Group(&'a RegistryGroup),
}

/// The process-wide registry
#[derive(Debug, Clone, Default)]
pub struct Registry {
    roots: Vec<(String, RegistryGroup)>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register an entity-type root ("job", "view", ...)
    pub fn entity(mut self, name: &str, group: RegistryGroup) -> Self {
        self.roots.push((name.to_string(), group));
        self
    }

    /// Root group for an entity type
    pub fn root(&self, entity_type: &str) -> Option<&RegistryGroup> {
        self.roots
            .iter()
            .find(|(name, _)| name == entity_type)
            .map(|(_, group)| group)
    }

    /// Resolve a segmented path; the first segment is the entity type
    ///
    /// Deterministic and side-effect-free. `UnknownPath` when any segment
    /// fails to resolve.
    pub fn lookup(&self, segments: &[&str]) -> Result<Lookup<'_>, CompileError> {
        let unknown = || CompileError::UnknownPath {
            path: segments.join("."),
        };
        let (entity, rest) = segments.split_first().ok_or_else(unknown)?;
        let mut current = self.root(entity).ok_or_else(unknown)?;
        let mut rest = rest;
        loop {
            let (segment, tail) = match rest.split_first() {
                Some(split) => split,
                None => return Ok(Lookup::Group(current)),
            };
            match current.get(segment).ok_or_else(unknown)? {
                RegistryNode::Group(group) => {
                    current = group;
                    rest = tail;
                }
                RegistryNode::Entry(entry) => {
                    if tail.is_empty() {
                        return Ok(Lookup::Entry(entry));
                    }
                    return Err(unknown());
                }
            }
        }
    }

    /// Record the installed version for the entry at a dotted path
    ///
    /// Fails with `UnknownPath` when the path does not resolve to an entry,
    /// and `InvalidVersion` when the version string does not parse.
    pub fn install_version(&mut self, path: &str, version: &str) -> Result<(), CompileError> {
        let parsed: Version = version.parse()?;
        let entry = self.entry_mut(path)?;
        entry.install(parsed);
        Ok(())
    }

    /// Reset every installed version; used between independent compilations
    pub fn clear_versions(&mut self) {
        for (_, group) in &mut self.roots {
            group.clear_versions();
        }
    }

    fn entry_mut(&mut self, path: &str) -> Result<&mut Entry, CompileError> {
        let unknown = || CompileError::UnknownPath {
            path: path.to_string(),
        };
        let mut segments = path.split('.');
        let entity = segments.next().ok_or_else(unknown)?;
        let mut current = self
            .roots
            .iter_mut()
            .find(|(name, _)| name == entity)
            .map(|(_, group)| group)
            .ok_or_else(unknown)?;

        let mut segments = segments.peekable();
        loop {
            let segment = segments.next().ok_or_else(unknown)?;
            match current.get_mut(segment).ok_or_else(unknown)? {
                RegistryNode::Group(group) => current = group,
                RegistryNode::Entry(entry) => {
                    if segments.peek().is_none() {
                        return Ok(entry);
                    }
                    return Err(unknown());
                }
            }
        }
    }
}
