//! Parser for enum specification files.
//!
//! A specification is plain text with one enum member per line:
//!
//! ```text
//! <name> [value]
//! ```
//!
//! Fields are separated by whitespace. The first field is the member name,
//! the second an optional raw value, and anything after that is ignored.
//! There is no comment syntax, quoting or escaping.

use crate::error::{CliResult, ParseError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One value of a generated enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumMember {
    /// Member identifier, as written. Not validated.
    pub name: String,

    /// Optional raw value; empty when the line has a single field.
    #[serde(rename = "Value")]
    pub raw_value: String,

    /// Set only on the first member of a file.
    pub is_first: bool,
}

/// Parsed content of one specification file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    /// Type name derived from the file's base name.
    pub type_name: String,

    /// Members in file order.
    pub members: Vec<EnumMember>,
}

/// Treatment of blank (empty or whitespace-only) lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankLines {
    /// Blank lines produce no member.
    #[default]
    Skip,

    /// Each blank line produces a member with an empty name and value.
    Keep,
}

/// Parser for specification files.
#[derive(Debug, Default, Clone)]
pub struct SpecParser {
    blank_lines: BlankLines,
}

impl SpecParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blank line policy.
    pub fn with_blank_lines(mut self, policy: BlankLines) -> Self {
        self.blank_lines = policy;
        self
    }

    /// Read and parse a specification file.
    ///
    /// `extension` is the recognized specification extension stripped from
    /// the file name to form the type name.
    pub fn parse_file(&self, path: &Path, extension: &str) -> CliResult<EnumSpec> {
        let type_name = type_name_for(path, extension).ok_or_else(|| {
            ParseError::InvalidFileName {
                file: path.to_path_buf(),
            }
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
            file: path.to_path_buf(),
            source: e,
        })?;

        let members = self.parse_str(&content);
        tracing::debug!(
            path = %path.display(),
            type_name = %type_name,
            members = members.len(),
            "Parsed specification"
        );

        Ok(EnumSpec { type_name, members })
    }

    /// Parse specification text into members, preserving line order.
    pub fn parse_str(&self, content: &str) -> Vec<EnumMember> {
        let mut members = Vec::new();

        for line in content.lines() {
            let mut fields = line.split_whitespace();
            let name = fields.next();

            if name.is_none() && self.blank_lines == BlankLines::Skip {
                continue;
            }

            members.push(EnumMember {
                name: name.unwrap_or_default().to_string(),
                raw_value: fields.next().unwrap_or_default().to_string(),
                is_first: members.is_empty(),
            });
        }

        members
    }
}

/// Derive the enum type name from a specification file path.
///
/// `Alignment.goenum` becomes `Alignment`. When the file does not carry
/// `extension`, only its last extension is dropped. Returns `None` for paths
/// without a usable file name.
pub fn type_name_for(path: &Path, extension: &str) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let type_name = match file_name.strip_suffix(extension) {
        Some(stem) => stem,
        None => path.file_stem()?.to_str()?,
    };

    if type_name.is_empty() {
        None
    } else {
        Some(type_name.to_string())
    }
}
