//! Render context construction.
//!
//! A [`RenderContext`] is the typed set of bindings for one template pass.
//! It is converted to the template engine's data model only at the edge,
//! through [`RenderContext::to_template_data`].

use crate::error::ContextError;
use crate::parser::{EnumMember, EnumSpec};
use serde::Serialize;

/// Bindings passed to the template for one specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Package name shared by every file in the run.
    #[serde(rename = "Package")]
    pub package_name: String,

    /// Enum type name.
    #[serde(rename = "EnumType")]
    pub enum_type: String,

    /// Members in specification order.
    #[serde(rename = "EnumValues")]
    pub enum_values: Vec<EnumMember>,

    /// Number of members.
    #[serde(rename = "EnumCount")]
    pub enum_count: usize,

    /// Name of the last member.
    #[serde(rename = "EnumLastValue")]
    pub enum_last_value: String,
}

impl RenderContext {
    /// Build the context for `spec`.
    ///
    /// Fails when the specification has no members, since there is no last
    /// value to bind.
    pub fn build(spec: &EnumSpec, package_name: &str) -> Result<Self, ContextError> {
        let Some(last) = spec.members.last() else {
            return Err(ContextError::EmptyMembers {
                type_name: spec.type_name.clone(),
            });
        };

        Ok(Self {
            package_name: package_name.to_string(),
            enum_type: spec.type_name.clone(),
            enum_values: spec.members.clone(),
            enum_count: spec.members.len(),
            enum_last_value: last.name.clone(),
        })
    }

    /// Convert to the key/value form consumed by the template engine.
    pub fn to_template_data(&self) -> serde_json::Value {
        serde_json::json!({
            "Package": self.package_name,
            "EnumType": self.enum_type,
            "EnumValues": self
                .enum_values
                .iter()
                .map(member_data)
                .collect::<Vec<_>>(),
            "EnumCount": self.enum_count,
            "EnumLastValue": self.enum_last_value,
        })
    }
}

fn member_data(member: &EnumMember) -> serde_json::Value {
    serde_json::json!({
        "Name": member.name,
        "Value": member.raw_value,
        "IsFirst": member.is_first,
    })
}
