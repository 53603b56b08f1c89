//! Converter settings that can be embedded in a host application's config.

use serde::Deserialize;

/// Construction-time options for `XmlConverter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Reject XML content the target type does not declare.
    pub strict: bool,
    /// Prefix encoded bodies with an XML declaration.
    pub xml_declaration: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            strict: true,
            xml_declaration: false,
        }
    }
}
