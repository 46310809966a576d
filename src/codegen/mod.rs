//! Schema → TypeScript interface declaration.
//!
//! One `Codegen` is one generation run: it borrows the schema, accumulates
//! emitted declarations, and owns the relation table for that run only.
pub mod relation;
pub mod resolve;
pub mod union;

#[cfg(test)]
mod tests;

use tracing::{debug, trace};

use crate::error::GenerateError;
use crate::path::PropertyPath;
use crate::schema::{is_listed, Properties, Property, Schema};

pub use relation::{process_foreign_key, related_type_name, RelationTable};
pub use resolve::resolve_leaf;
pub use union::{combine, combine_enum};

pub(crate) const STRING_TOKEN: &str = "string";
pub(crate) const NUMBER_TOKEN: &str = "number";
pub(crate) const BOOLEAN_TOKEN: &str = "boolean";
pub(crate) const NULL_TOKEN: &str = "null";
pub(crate) const NULLABLE_SUFFIX: &str = " | null";

/// Object-typed property without declared `properties`.
pub const UNKNOWN_MAP: &str = "{ [key: string]: unknown; }";
/// Trailing catch-all member of every top-level interface.
pub const INDEX_SIGNATURE: &str = "[key: string]: unknown;";

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub source: String,
    pub relations: RelationTable,
}

// ————————————————————————————————————————————————————————————————————————————
// EMITTER
// ————————————————————————————————————————————————————————————————————————————

pub struct Codegen<'a> {
    schema: &'a Schema,
    out: String,
    relations: RelationTable,
}

impl<'a> Codegen<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema, out: String::new(), relations: RelationTable::new() }
    }

    /// Emit `export interface <name> { ... }` for the whole schema.
    ///
    /// Nothing is appended (and no relation is recorded) unless every
    /// property resolves.
    pub fn emit(&mut self, name: &str) -> Result<(), GenerateError> {
        let schema = self.schema;
        let required = schema.required.as_deref();
        let root = PropertyPath::root();

        let mut members = Vec::with_capacity(schema.properties.len() + 1);
        for (key, property) in &schema.properties {
            let field_name = key.trim();
            members.push(process_property(field_name, property, required, &root.child(field_name))?);
        }

        let mut relations = Vec::new();
        for (key, property) in &schema.properties {
            if let Some(decl) = process_foreign_key(key.trim(), property, required, &mut self.relations) {
                relations.push(decl);
            }
        }
        debug!(
            interface = name,
            properties = members.len(),
            relations = relations.len(),
            "emitted interface"
        );

        members.extend(relations);
        members.push(INDEX_SIGNATURE.to_string());

        if !self.out.is_empty() {
            self.out.push_str("\n\n");
        }
        self.out.push_str(&format!("export interface {name} {{ {} }}", members.join("\n")));
        Ok(())
    }

    pub fn relations(&self) -> &RelationTable {
        &self.relations
    }

    pub fn into_string(self) -> String {
        self.out
    }

    pub fn into_output(self) -> Generated {
        Generated { source: self.out, relations: self.relations }
    }
}

/// One-shot: a fresh run over `schema`, emitting a single declaration.
pub fn generate(name: &str, schema: &Schema) -> Result<Generated, GenerateError> {
    let mut cg = Codegen::new(schema);
    cg.emit(name)?;
    Ok(cg.into_output())
}

// ————————————————————————————————————————————————————————————————————————————
// MEMBERS
// ————————————————————————————————————————————————————————————————————————————

/// `name: expr;`, or `name?: expr;` unless `name` is listed in `required`.
pub(crate) fn process_property(
    field_name: &str,
    property: &Property,
    required: Option<&[String]>,
    path: &PropertyPath,
) -> Result<String, GenerateError> {
    let expr = resolve::resolve_shape(property, path)?;
    trace!(path = %path, expression = %expr, "resolved property");
    let optional = if is_listed(required, field_name) { "" } else { "?" };
    Ok(format!("{field_name}{optional}: {expr};"))
}

/// Structural expression for an object-typed property. Nested levels get
/// neither an index signature nor relation fields.
pub(crate) fn render_object(property: &Property, path: &PropertyPath) -> Result<String, GenerateError> {
    match &property.properties {
        None => Ok(UNKNOWN_MAP.to_string()),
        Some(properties) => render_members(properties, property.required.as_deref(), path),
    }
}

fn render_members(
    properties: &Properties,
    required: Option<&[String]>,
    path: &PropertyPath,
) -> Result<String, GenerateError> {
    if properties.is_empty() {
        return Ok("{}".to_string());
    }
    let members = properties
        .iter()
        .map(|(key, property)| process_property(key, property, required, &path.child(key.as_str())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{{ {} }}", members.join(" ")))
}
