//! Parameter schemas, alternate-shape normalization, and validation
//!
//! Each generator band declares a [`ParameterSchema`]: the recognized
//! parameter names, their kinds, required flags, and defaults, plus which
//! alternate input shapes the capability accepts. Every accepted shape is
//! normalized to the canonical mapping form before key-by-key validation,
//! so legacy inputs and canonical inputs produce identical [`Params`].

use crate::error::CompileError;
use crate::value::ConfigNode;

/// Kind a parameter value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any scalar, rendered as element text
    Text,
    /// Boolean only
    Bool,
    /// Integer only
    Integer,
    /// Sequence of nodes
    Sequence,
    /// Nested mapping
    Mapping,
}

impl ParamKind {
    fn expected(&self) -> &'static str {
        match self {
            ParamKind::Text => "scalar",
            ParamKind::Bool => "boolean",
            ParamKind::Integer => "integer",
            ParamKind::Sequence => "sequence",
            ParamKind::Mapping => "mapping",
        }
    }

    fn accepts(&self, value: &ConfigNode) -> bool {
        match self {
            ParamKind::Text => value.is_scalar(),
            ParamKind::Bool => matches!(value, ConfigNode::Bool(_)),
            ParamKind::Integer => matches!(value, ConfigNode::Int(_)),
            ParamKind::Sequence => matches!(value, ConfigNode::Sequence(_)),
            ParamKind::Mapping => matches!(value, ConfigNode::Mapping(_)),
        }
    }
}

/// One declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: &'static str,
    kind: ParamKind,
    required: bool,
    default: Option<ConfigNode>,
}

impl ParamSpec {
    pub fn new(name: &'static str, kind: ParamKind) -> Self {
        ParamSpec {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    pub fn text(name: &'static str) -> Self {
        ParamSpec::new(name, ParamKind::Text)
    }

    pub fn boolean(name: &'static str) -> Self {
        ParamSpec::new(name, ParamKind::Bool)
    }

    pub fn integer(name: &'static str) -> Self {
        ParamSpec::new(name, ParamKind::Integer)
    }

    pub fn sequence(name: &'static str) -> Self {
        ParamSpec::new(name, ParamKind::Sequence)
    }

    /// Mark the parameter required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default applied when the parameter is absent
    pub fn with_default(mut self, value: impl Into<ConfigNode>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Schema for one capability band
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    params: Vec<ParamSpec>,
    bare_bool: bool,
    sequence_alias: Option<&'static str>,
    scalar_alias: Option<&'static str>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        ParameterSchema::default()
    }

    /// Declare a parameter
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Accept bare `true` as "enable with defaults"
    pub fn allow_bare_bool(mut self) -> Self {
        self.bare_bool = true;
        self
    }

    /// Accept a bare sequence as `{ <alias>: <sequence> }`
    pub fn sequence_alias(mut self, alias: &'static str) -> Self {
        self.sequence_alias = Some(alias);
        self
    }

    /// Accept a bare scalar as `{ <alias>: <scalar> }`
    pub fn scalar_alias(mut self, alias: &'static str) -> Self {
        self.scalar_alias = Some(alias);
        self
    }

    /// Normalize and validate raw input for `capability`
    ///
    /// All-or-nothing: either the full normalized parameter set comes back,
    /// or the input was an explicit `false` (skip), or the first violation
    /// is reported.
    pub fn validate(
        &self,
        capability: &str,
        input: &ConfigNode,
    ) -> Result<Validated, CompileError> {
        let entries = match self.normalize(capability, input)? {
            Normalized::Disabled => return Ok(Validated::Disabled),
            Normalized::Entries(entries) => entries,
        };

        for (key, value) in &entries {
            let spec = self
                .params
                .iter()
                .find(|spec| spec.name == key)
                .ok_or_else(|| CompileError::UnknownParameter {
                    capability: capability.to_string(),
                    name: key.clone(),
                })?;
            if !spec.kind.accepts(value) {
                return Err(CompileError::InvalidParameterShape {
                    capability: capability.to_string(),
                    name: key.clone(),
                    expected: spec.kind.expected(),
                    actual: value.kind().to_string(),
                });
            }
        }

        // Defaults keep schema declaration order so normalized output is
        // deterministic regardless of input key order.
        let mut params = Vec::with_capacity(self.params.len());
        for spec in &self.params {
            let supplied = entries.iter().find(|(k, _)| k == spec.name);
            match supplied {
                Some((k, v)) => params.push((k.clone(), v.clone())),
                None => match (&spec.default, spec.required) {
                    (Some(default), _) => {
                        params.push((spec.name.to_string(), default.clone()));
                    }
                    (None, true) => {
                        return Err(CompileError::MissingParameter {
                            capability: capability.to_string(),
                            name: spec.name.to_string(),
                        });
                    }
                    (None, false) => {}
                },
            }
        }

        Ok(Validated::Params(Params(params)))
    }

    fn normalize(
        &self,
        capability: &str,
        input: &ConfigNode,
    ) -> Result<Normalized, CompileError> {
        let entries = match input {
            ConfigNode::Bool(false) => return Ok(Normalized::Disabled),
            ConfigNode::Bool(true) if self.bare_bool => Vec::new(),
            ConfigNode::Mapping(entries) => entries.clone(),
            ConfigNode::Sequence(_) => match self.sequence_alias {
                Some(alias) => vec![(alias.to_string(), input.clone())],
                None => return Err(self.shape_error(capability, input)),
            },
            // A bare boolean never goes through the scalar alias; enabling
            // with defaults requires the explicit bare-bool opt-in.
            ConfigNode::Bool(_) => return Err(self.shape_error(capability, input)),
            other if other.is_scalar() => match self.scalar_alias {
                Some(alias) => vec![(alias.to_string(), input.clone())],
                None => return Err(self.shape_error(capability, input)),
            },
            _ => return Err(self.shape_error(capability, input)),
        };
        Ok(Normalized::Entries(entries))
    }

    fn shape_error(&self, capability: &str, input: &ConfigNode) -> CompileError {
        let expected = if self.bare_bool && self.params.is_empty() {
            "boolean"
        } else if self.bare_bool {
            "boolean or mapping"
        } else {
            "mapping"
        };
        CompileError::InvalidParameterShape {
            capability: capability.to_string(),
            name: capability.to_string(),
            expected,
            actual: input.kind().to_string(),
        }
    }
}

enum Normalized {
    Disabled,
    Entries(Vec<(String, ConfigNode)>),
}

/// Outcome of validation
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    /// Input was a bare `false`: intentionally disabled, emit nothing
    Disabled,
    /// Normalized parameters with defaults applied
    Params(Params),
}

/// Normalized, validated parameters handed to a generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, ConfigNode)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&ConfigNode> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Scalar parameter rendered as text; empty string when absent
    pub fn text(&self, name: &str) -> String {
        self.get(name)
            .and_then(|v| v.scalar_text())
            .unwrap_or_default()
    }

    /// Boolean parameter; false when absent
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Sequence parameter; empty when absent
    pub fn sequence(&self, name: &str) -> &[ConfigNode] {
        self.get(name).and_then(|v| v.as_sequence()).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
