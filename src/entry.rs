//! Registry entries: one capability, its version bands, and its generators

use crate::error::CompileError;
use crate::schema::{ParameterSchema, Params};
use crate::version::{Version, VersionBand};
use crate::xml::Element;

/// Generates one XML fragment from validated parameters
///
/// Must be pure: no registry access, no failure for input that passed the
/// band's schema. Constraints belong in the schema, not here.
pub type Generator = fn(&Params) -> Element;

/// One (version band, schema, generator) triple
#[derive(Debug, Clone)]
pub struct Band {
    range: VersionBand,
    schema: ParameterSchema,
    generate: Generator,
}

impl Band {
    pub fn range(&self) -> &VersionBand {
        &self.range
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub fn generate(&self, params: &Params) -> Element {
        (self.generate)(params)
    }
}

/// Registry record for one capability
#[derive(Clone)]
pub struct Entry {
    name: String,
    bands: Vec<Band>,
    installed: Option<Version>,
}

impl Entry {
    pub fn new(name: &str) -> Self {
        Entry {
            name: name.to_string(),
            bands: Vec::new(),
            installed: None,
        }
    }

    /// Entry with a single band covering every version
    pub fn single(name: &str, schema: ParameterSchema, generate: Generator) -> Self {
        Entry::new(name).band(VersionBand::any(), schema, generate)
    }

    /// Add a band; bands stay sorted by descending lower bound so the most
    /// specific applicable band is found first
    pub fn band(mut self, range: VersionBand, schema: ParameterSchema, generate: Generator) -> Self {
        let band = Band {
            range,
            schema,
            generate,
        };
        let pos = self
            .bands
            .iter()
            .position(|existing| existing.range.min() < band.range.min())
            .unwrap_or(self.bands.len());
        self.bands.insert(pos, band);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn installed_version(&self) -> Option<&Version> {
        self.installed.as_ref()
    }

    /// Record the version discovered on the live backend
    pub fn install(&mut self, version: Version) {
        self.installed = Some(version);
    }

    /// Mark the capability as not available
    pub fn clear(&mut self) {
        self.installed = None;
    }

    /// Resolve the active band for the installed version
    ///
    /// `Ok(None)` means the capability is not currently offered (no version
    /// installed): a skip, not an error. A version with no containing band
    /// is `UnsupportedVersion`.
    pub fn resolve(&self, path: &str) -> Result<Option<&Band>, CompileError> {
        let installed = match &self.installed {
            Some(version) => version,
            None => return Ok(None),
        };
        self.bands
            .iter()
            .find(|band| band.range.contains(installed))
            .map(Some)
            .ok_or_else(|| CompileError::UnsupportedVersion {
                path: path.to_string(),
                version: installed.to_string(),
                supported: self.supported_ranges(),
            })
    }

    fn supported_ranges(&self) -> String {
        let ranges: Vec<String> = self.bands.iter().map(|b| b.range.to_string()).collect();
        ranges.join(", ")
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("bands", &self.bands.len())
            .field("installed", &self.installed)
            .finish()
    }
}
