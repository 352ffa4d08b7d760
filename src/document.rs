//! document synthesis
//!
//! walks a [`FieldShape`] and writes the minified selection set, then joins
//! it with the operation keyword and the variable header.
//!
//! e.g. `Node { id: String, parent: Option<Node> }` -> `{id,parent{id}}`.

use crate::arguments::Variables;
use crate::operation::OperationKind;
use crate::shape::{FieldShape, ObjectShape};

/// build a query document, e.g. `query($id:ID!){node{id}}`.
///
/// without variables only the selection set is returned.
pub fn build_query(shape: &FieldShape, variables: &Variables) -> String {
    build_document(OperationKind::Query, shape, variables)
}

/// build a mutation document, e.g. `mutation($id:ID!){delete{ok}}`.
///
/// without variables the keyword is still written: `mutation{ok}`.
pub fn build_mutation(shape: &FieldShape, variables: &Variables) -> String {
    build_document(OperationKind::Mutation, shape, variables)
}

/// build a document for either operation kind
pub fn build_document(kind: OperationKind, shape: &FieldShape, variables: &Variables) -> String {
    let body = selection_set(shape);
    let document = if !variables.is_empty() {
        format!("{}({}){}", kind.keyword(), variables.header(), body)
    } else {
        match kind {
            OperationKind::Query => body,
            OperationKind::Mutation => format!("{}{}", kind.keyword(), body),
        }
    };
    tracing::debug!(operation = kind.keyword(), %document, "built graphql document");
    document
}

/// render the minified selection set for a shape.
///
/// the root object is not placed on the visit path, so a root type that
/// refers to itself is expanded one level below the root.
pub fn selection_set(shape: &FieldShape) -> String {
    let mut root = shape;
    while let FieldShape::Optional(inner) | FieldShape::List(inner) = root {
        root = &**inner;
    }

    let mut out = String::new();
    if let FieldShape::Object(object) = root {
        let resolved = object.resolve();
        if !resolved.is_scalar_marker() {
            out.push('{');
            write_members(&mut out, &resolved, &mut VisitPath::default());
            out.push('}');
        }
    }
    out
}

/// shapes currently being expanded, root first.
///
/// entries are structural keys, so `Node`, `[Node]` and `Node?` are
/// distinct and a member wrapped in several layers still finds itself.
#[derive(Debug, Default)]
struct VisitPath {
    keys: Vec<String>,
}

impl VisitPath {
    fn push(&mut self, key: String) {
        self.keys.push(key);
    }

    fn pop(&mut self) {
        self.keys.pop();
    }

    fn contains(&self, shape: &FieldShape) -> bool {
        shape_key(shape).is_some_and(|key| self.keys.contains(&key))
    }
}

/// structural key of a shape, `None` when no object sits inside it
fn shape_key(shape: &FieldShape) -> Option<String> {
    match shape {
        FieldShape::Scalar => None,
        FieldShape::Object(object) => Some(object.name().to_string()),
        FieldShape::Optional(inner) => shape_key(inner).map(|key| format!("{key}?")),
        FieldShape::List(inner) => shape_key(inner).map(|key| format!("[{key}]")),
    }
}

/// key to push for a member base, `None` for scalars and scalar-marked objects
fn tracked_key(base: &FieldShape) -> Option<String> {
    let mut innermost = base;
    while let FieldShape::Optional(inner) | FieldShape::List(inner) = innermost {
        innermost = &**inner;
    }
    let object = innermost.as_object()?;
    if object.resolve().is_scalar_marker() {
        return None;
    }
    shape_key(base)
}

/// write the selection for `shape`. inlined objects splice their members
/// into the parent without braces.
fn write_selection(out: &mut String, shape: &FieldShape, inline: bool, path: &mut VisitPath) {
    match shape {
        FieldShape::Scalar => {}
        FieldShape::Optional(inner) | FieldShape::List(inner) => {
            write_selection(out, inner, inline, path)
        }
        FieldShape::Object(object) => {
            let resolved = object.resolve();
            if resolved.is_scalar_marker() {
                return;
            }
            path.push(object.name().to_string());
            if !inline {
                out.push('{');
            }
            write_members(out, &resolved, path);
            if !inline {
                out.push('}');
            }
            path.pop();
        }
    }
}

fn write_members(out: &mut String, object: &ObjectShape, path: &mut VisitPath) {
    let mut first = true;
    for member in object.members() {
        let base = member.shape().unwrap_one();
        if path.contains(base) {
            continue;
        }
        if let Some(object) = base.as_object() {
            if wraps_visited(&object.resolve(), path) {
                continue;
            }
        }

        if !first {
            out.push(',');
        }
        first = false;

        let embedded = member.is_embedded();
        if !embedded {
            out.push_str(&member.selection_name());
        }

        let tracked = tracked_key(base);
        if let Some(key) = &tracked {
            path.push(key.clone());
        }
        write_selection(out, member.shape(), embedded, path);
        if tracked.is_some() {
            path.pop();
        }
    }
}

/// a single-member object whose only member points back into the path.
///
/// only exactly one member counts; wrappers with more members are expanded.
fn wraps_visited(object: &ObjectShape, path: &VisitPath) -> bool {
    match object.members() {
        [only] => path.contains(only.shape().unwrap_one()),
        _ => false,
    }
}
