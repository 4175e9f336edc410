//! Built-in capability catalog
//!
//! The registry the original tool ships for the `job` entity type:
//! build wrappers, triggers, builders, and publishers, each mapped to the
//! `config.xml` fragment its backing Jenkins plugin expects. The core
//! engine only consumes this data; adding a capability means adding an
//! entry here, not touching the engine.

pub mod builders;
pub mod publishers;
pub mod triggers;
pub mod wrappers;

use crate::registry::{Registry, RegistryGroup};
use crate::version::Version;

/// Parse a version literal from the catalog tables
pub(crate) fn v(literal: &str) -> Version {
    literal.parse().expect("catalog version literals are valid")
}

/// The registry of built-in capabilities, nothing installed yet
///
/// Callers record discovered backend versions with
/// [`Registry::install_version`] before compiling.
pub fn default_registry() -> Registry {
    Registry::new().entity(
        "job",
        RegistryGroup::new()
            .group("wrappers", wrappers::group())
            .group("triggers", triggers::group())
            .group("builders", builders::group())
            .group("publishers", publishers::group()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Lookup;

    #[test]
    fn test_all_categories_have_containers() {
        let registry = default_registry();
        for (category, container) in [
            ("wrappers", "buildWrappers"),
            ("triggers", "triggers"),
            ("builders", "builders"),
            ("publishers", "publishers"),
        ] {
            match registry.lookup(&["job", category]).unwrap() {
                Lookup::Group(group) => {
                    assert_eq!(group.container_element(), Some(container), "{}", category);
                }
                Lookup::Entry(_) => panic!("{} should be a group", category),
            }
        }
    }

    #[test]
    fn test_nothing_installed_by_default() {
        let registry = default_registry();
        match registry.lookup(&["job", "wrappers", "timestamp"]).unwrap() {
            Lookup::Entry(entry) => assert!(entry.installed_version().is_none()),
            Lookup::Group(_) => panic!("expected entry"),
        }
    }
}
