use crate::error::GenerateError;
use crate::path::PropertyPath;
use crate::schema::{Property, PropertyType, TypeDecl};

use super::union::{combine, combine_enum};
use super::{render_object, STRING_TOKEN, NUMBER_TOKEN, BOOLEAN_TOKEN};

/// A `type` declaration after classification against the closed tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shapes {
    Single(PropertyType),
    Pair(PropertyType, PropertyType),
}

pub(crate) fn classify(decl: &TypeDecl, path: &PropertyPath) -> Result<Shapes, GenerateError> {
    let unsupported = || GenerateError::UnsupportedShape {
        path: path.clone(),
        shape: decl.to_string(),
    };
    let tags = decl.tags();
    let parsed = tags
        .iter()
        .map(|t| t.parse::<PropertyType>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| unsupported())?;
    match (decl, parsed.as_slice()) {
        (TypeDecl::Single(_), [t]) => Ok(Shapes::Single(*t)),
        // A one-element list reads the same as a bare tag.
        (TypeDecl::Alternatives(_), [t]) => Ok(Shapes::Single(*t)),
        (TypeDecl::Alternatives(_), [a, b]) => Ok(Shapes::Pair(*a, *b)),
        _ => Err(unsupported()),
    }
}

/// Expression for one non-object shape. `Ok(None)` means "null": no literal,
/// only a nullability marker for the surrounding union.
pub fn resolve_leaf(
    shape: PropertyType,
    property: &Property,
    path: &PropertyPath,
) -> Result<Option<String>, GenerateError> {
    match shape {
        PropertyType::Null => Ok(None),
        PropertyType::String => {
            let literals = property.enum_.as_deref().map(combine_enum).unwrap_or_default();
            if literals.is_empty() {
                Ok(Some(STRING_TOKEN.to_string()))
            } else {
                Ok(Some(literals))
            }
        }
        PropertyType::Number => Ok(Some(NUMBER_TOKEN.to_string())),
        PropertyType::Boolean => Ok(Some(BOOLEAN_TOKEN.to_string())),
        // Objects are dispatched by `resolve_shape` and never reach a leaf.
        PropertyType::Object => Err(GenerateError::UnsupportedShape {
            path: path.clone(),
            shape: "object as a leaf".to_string(),
        }),
    }
}

/// Full type expression for one property.
pub(crate) fn resolve_shape(property: &Property, path: &PropertyPath) -> Result<String, GenerateError> {
    match classify(&property.type_, path)? {
        Shapes::Single(PropertyType::Object) => render_object(property, path),
        Shapes::Pair(a, b) if a == PropertyType::Object || b == PropertyType::Object => {
            let other = if a == PropertyType::Object { b } else { a };
            if other != PropertyType::Null {
                return Err(GenerateError::InvalidObjectPair {
                    path: path.clone(),
                    other: other.to_string(),
                });
            }
            let object = render_object(property, path)?;
            Ok(combine(&[Some(object), None]))
        }
        Shapes::Pair(a, b) => {
            // `["null", "string"]` renders the same as `["string", "null"]`.
            let (a, b) = if a == PropertyType::Null { (b, a) } else { (a, b) };
            let first = resolve_leaf(a, property, path)?;
            let second = resolve_leaf(b, property, path)?;
            Ok(combine(&[first, second]))
        }
        Shapes::Single(t) => Ok(combine(&[resolve_leaf(t, property, path)?])),
    }
}
