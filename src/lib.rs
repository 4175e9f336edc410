//! jobforge - declarative job definitions compiled to Jenkins XML
//!
//! Compiles a nested configuration document (mappings and sequences of
//! primitive values, typically parsed from YAML) into a Jenkins
//! `config.xml` tree, guided by a versioned capability registry.
//!
//! # Architecture
//!
//! ```text
//! ConfigNode -> Engine -> Registry -> Entry -> Generator -> Document
//! ```
//!
//! The engine walks the configuration against the registry: each key
//! resolves to a capability entry (or a grouping to recurse into), its
//! parameters are normalized and validated against the entry's schema, the
//! generator for the installed backend version produces an XML fragment,
//! and the fragment is attached under the category's container element in
//! input order. Capabilities with no installed version are skipped
//! silently, since plugin availability varies across backends.
//!
//! # Example
//!
//! ```
//! use jobforge::{catalog, compile, ConfigNode, Document};
//!
//! let mut registry = catalog::default_registry();
//! registry.install_version("job.wrappers.timestamp", "1.8").unwrap();
//!
//! let config: ConfigNode =
//!     serde_yaml::from_str("wrappers:\n  timestamp: true\n").unwrap();
//! let mut doc = Document::new("project");
//! compile(&registry, "job", &config, &mut doc).unwrap();
//!
//! assert!(doc.to_xml().contains("TimestamperBuildWrapper"));
//! ```

pub mod catalog;
pub mod engine;
pub mod entry;
pub mod error;
pub mod registry;
pub mod schema;
pub mod value;
pub mod version;
pub mod xml;

// Re-export main types
pub use engine::{compile, Engine};
pub use entry::{Band, Entry, Generator};
pub use error::CompileError;
pub use registry::{Lookup, Registry, RegistryGroup, RegistryNode};
pub use schema::{ParamKind, ParamSpec, ParameterSchema, Params, Validated};
pub use value::ConfigNode;
pub use version::{Version, VersionBand};
pub use xml::{Document, Element, XmlNode};
