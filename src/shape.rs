//! field shapes
//!
//! a [`FieldShape`] describes one node of the response tree a caller wants
//! back. object shapes are resolved lazily, which lets a type refer to
//! itself (`Node { parent: Option<Node> }`) without building an infinite
//! value. shapes are built once and only read while a document is built.

use crate::ident::to_lower_camel_case;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

type Resolver = Arc<dyn Fn() -> Arc<ObjectShape> + Send + Sync>;

/// shape of one node in the response tree
#[derive(Clone)]
pub enum FieldShape {
    /// leaf value, selected by name only
    Scalar,
    /// composite record, expanded into a selection set
    Object(ObjectRef),
    /// nullable wrapper, contributes no syntax
    Optional(Box<FieldShape>),
    /// list wrapper, contributes no syntax
    List(Box<FieldShape>),
}

impl FieldShape {
    /// a leaf shape
    pub fn scalar() -> Self {
        FieldShape::Scalar
    }

    /// wrap a shape as nullable
    pub fn optional(inner: FieldShape) -> Self {
        FieldShape::Optional(Box::new(inner))
    }

    /// wrap a shape as a list
    pub fn list(inner: FieldShape) -> Self {
        FieldShape::List(Box::new(inner))
    }

    /// a lazily resolved object shape.
    ///
    /// `name` is the identity used for cycle detection, so two shapes with
    /// the same name are treated as the same type.
    pub fn object<F>(name: impl Into<Cow<'static, str>>, resolve: F) -> Self
    where
        F: Fn() -> ObjectShape + Send + Sync + 'static,
    {
        FieldShape::Object(ObjectRef {
            name: name.into(),
            resolve: Arc::new(move || Arc::new(resolve())),
        })
    }

    /// an eagerly built object shape, shared by every resolve
    pub fn record(shape: ObjectShape) -> Self {
        let shape = Arc::new(shape);
        FieldShape::Object(ObjectRef {
            name: shape.name.clone(),
            resolve: Arc::new(move || Arc::clone(&shape)),
        })
    }

    /// the shape of a [`Shaped`] type
    pub fn of<T: Shaped + ?Sized>() -> Self {
        T::shape()
    }

    /// strip one optional or list layer, if present
    pub fn unwrap_one(&self) -> &FieldShape {
        match self {
            FieldShape::Optional(inner) | FieldShape::List(inner) => &**inner,
            other => other,
        }
    }

    /// the object reference, if this shape is an object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            FieldShape::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldShape::Scalar => f.write_str("Scalar"),
            FieldShape::Object(object) => write!(f, "Object({})", object.name),
            FieldShape::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            FieldShape::List(inner) => f.debug_tuple("List").field(inner).finish(),
        }
    }
}

/// named, lazily resolved reference to an [`ObjectShape`]
#[derive(Clone)]
pub struct ObjectRef {
    name: Cow<'static, str>,
    resolve: Resolver,
}

impl ObjectRef {
    /// type name, used as the cycle detection identity
    pub fn name(&self) -> &str {
        &self.name
    }

    /// build the object shape
    pub fn resolve(&self) -> Arc<ObjectShape> {
        (self.resolve)()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ObjectRef {}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.name).finish()
    }
}

/// composite record with ordered members
#[derive(Debug, Clone)]
pub struct ObjectShape {
    name: Cow<'static, str>,
    scalar_marker: bool,
    members: Vec<Member>,
}

impl ObjectShape {
    /// create an empty object shape
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            scalar_marker: false,
            members: Vec::new(),
        }
    }

    /// mark the object as an opaque leaf.
    ///
    /// use this for types that decode themselves from a raw value (dates,
    /// custom ids); their members are never expanded.
    pub fn scalar(mut self) -> Self {
        self.scalar_marker = true;
        self
    }

    /// append a member
    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// append a named member
    pub fn field(self, name: impl Into<Cow<'static, str>>, shape: FieldShape) -> Self {
        self.member(Member::new(name, shape))
    }

    /// append a named member whose shape comes from a [`Shaped`] type
    pub fn field_of<T: Shaped + ?Sized>(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.field(name, T::shape())
    }

    /// append an embedded member whose fields are spliced into this object
    pub fn embed(self, name: impl Into<Cow<'static, str>>, shape: FieldShape) -> Self {
        self.member(Member::embedded(name, shape))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_scalar_marker(&self) -> bool {
        self.scalar_marker
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

/// one member of an [`ObjectShape`]
#[derive(Debug, Clone)]
pub struct Member {
    name: Cow<'static, str>,
    shape: FieldShape,
    wire_name: Option<Cow<'static, str>>,
    embedded: bool,
}

impl Member {
    /// a member selected under its lower camel case name
    pub fn new(name: impl Into<Cow<'static, str>>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            shape,
            wire_name: None,
            embedded: false,
        }
    }

    /// a member whose fields are spliced into the parent selection set
    pub fn embedded(name: impl Into<Cow<'static, str>>, shape: FieldShape) -> Self {
        Self {
            embedded: true,
            ..Self::new(name, shape)
        }
    }

    /// select the member under an explicit name.
    ///
    /// the override is written verbatim, so it may carry arguments or an
    /// alias (`node(id:$id)`). an override on an embedded member turns it
    /// back into a regular field.
    pub fn rename(mut self, wire_name: impl Into<Cow<'static, str>>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }

    pub fn wire_name(&self) -> Option<&str> {
        self.wire_name.as_deref()
    }

    /// true if the member splices into its parent
    pub fn is_embedded(&self) -> bool {
        self.embedded && self.wire_name.is_none()
    }

    /// the name written into the selection set
    pub fn selection_name(&self) -> Cow<'_, str> {
        match &self.wire_name {
            Some(wire_name) => Cow::Borrowed(wire_name.as_ref()),
            None => Cow::Owned(to_lower_camel_case(&self.name)),
        }
    }
}

/// types that describe their own response shape
///
/// ```
/// use gql_shape::{FieldShape, ObjectShape, Shaped};
///
/// struct Node {
///     id: String,
///     parent: Option<Box<Node>>,
/// }
///
/// impl Shaped for Node {
///     fn shape() -> FieldShape {
///         FieldShape::object("Node", || {
///             ObjectShape::new("Node")
///                 .field_of::<String>("id")
///                 .field_of::<Option<Box<Node>>>("parent")
///         })
///     }
/// }
///
/// assert_eq!(gql_shape::selection_set(&Node::shape()), "{id,parent{id}}");
/// ```
pub trait Shaped {
    fn shape() -> FieldShape;
}

macro_rules! scalar_shapes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Shaped for $ty {
                fn shape() -> FieldShape {
                    FieldShape::Scalar
                }
            }
        )*
    };
}

scalar_shapes!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String, serde_json::Value,
);

impl<T: Shaped> Shaped for Option<T> {
    fn shape() -> FieldShape {
        FieldShape::optional(T::shape())
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> FieldShape {
        FieldShape::list(T::shape())
    }
}

impl<T: Shaped> Shaped for VecDeque<T> {
    fn shape() -> FieldShape {
        FieldShape::list(T::shape())
    }
}

impl<T: Shaped> Shaped for [T] {
    fn shape() -> FieldShape {
        FieldShape::list(T::shape())
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    fn shape() -> FieldShape {
        FieldShape::list(T::shape())
    }
}

impl<T: Shaped + ?Sized> Shaped for Box<T> {
    fn shape() -> FieldShape {
        T::shape()
    }
}

impl<T: Shaped + ?Sized> Shaped for Arc<T> {
    fn shape() -> FieldShape {
        T::shape()
    }
}

// maps decode from arbitrary json objects and cannot be expanded
impl<K, V> Shaped for HashMap<K, V> {
    fn shape() -> FieldShape {
        FieldShape::Scalar
    }
}

impl<K, V> Shaped for BTreeMap<K, V> {
    fn shape() -> FieldShape {
        FieldShape::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrappers_unwrap_one_layer() {
        let shape = FieldShape::of::<Option<Vec<String>>>();
        assert!(matches!(shape, FieldShape::Optional(_)));
        assert!(matches!(shape.unwrap_one(), FieldShape::List(_)));
        assert!(matches!(
            shape.unwrap_one().unwrap_one(),
            FieldShape::Scalar
        ));
    }

    #[test]
    fn test_box_is_transparent() {
        assert!(matches!(FieldShape::of::<Box<i32>>(), FieldShape::Scalar));
    }

    #[test]
    fn test_record_resolves_to_same_shape() {
        let shape = FieldShape::record(ObjectShape::new("User").field_of::<String>("Name"));
        let object = shape.as_object().expect("object");
        assert_eq!(object.name(), "User");
        let resolved = object.resolve();
        assert_eq!(resolved.members().len(), 1);
        assert_eq!(resolved.members()[0].name(), "Name");
        assert!(Arc::ptr_eq(&resolved, &object.resolve()));
    }

    #[test]
    fn test_object_identity_is_name() {
        let a = FieldShape::object("Node", || ObjectShape::new("Node"));
        let b = FieldShape::record(ObjectShape::new("Node").field_of::<i32>("Id"));
        assert_eq!(a.as_object(), b.as_object());
    }

    #[test]
    fn test_member_selection_name() {
        let plain = Member::new("UserID", FieldShape::Scalar);
        assert_eq!(plain.selection_name(), "userID");

        let renamed = Member::new("Viewer", FieldShape::Scalar).rename("me");
        assert_eq!(renamed.selection_name(), "me");
    }

    #[test]
    fn test_embedded_with_rename_is_not_embedded() {
        let embedded = Member::embedded("Common", FieldShape::Scalar);
        assert!(embedded.is_embedded());
        assert!(!embedded.rename("common").is_embedded());
    }

    #[test]
    fn test_debug_names_objects() {
        let shape = FieldShape::optional(FieldShape::object("Node", || ObjectShape::new("Node")));
        assert_eq!(format!("{shape:?}"), "Optional(Object(Node))");
    }
}
