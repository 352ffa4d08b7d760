//! variable bindings
//!
//! [`Variables`] maps variable names to typed values and renders the
//! minified `$name:Type!` declaration header for them.

use crate::error::{Error, Result};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// graphql type of a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgType {
    /// named type, e.g. `Int`
    Named(Cow<'static, str>),
    /// nullable type, rendered without `!`
    Optional(Box<ArgType>),
    /// list type, e.g. `[Int!]`
    List(Box<ArgType>),
}

impl ArgType {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        ArgType::Named(name.into())
    }

    pub fn optional(inner: ArgType) -> Self {
        ArgType::Optional(Box::new(inner))
    }

    pub fn list(element: ArgType) -> Self {
        ArgType::List(Box::new(element))
    }

    /// the type of an [`InputType`] value
    pub fn of<T: InputType + ?Sized>() -> Self {
        T::arg_type()
    }

    /// write the minified type. `required` adds the trailing `!`.
    pub(crate) fn write(&self, out: &mut String, required: bool) {
        match self {
            // nested optionals collapse into one nullable type
            ArgType::Optional(inner) => {
                inner.write(out, false);
                return;
            }
            ArgType::List(element) => {
                out.push('[');
                element.write(out, true);
                out.push(']');
            }
            ArgType::Named(name) => out.push_str(name),
        }
        if required {
            out.push('!');
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write(&mut out, true);
        f.write_str(&out)
    }
}

/// rust types that can be bound to a graphql variable
pub trait InputType {
    fn arg_type() -> ArgType;
}

macro_rules! named_inputs {
    ($name:literal => $($ty:ty),* $(,)?) => {
        $(
            impl InputType for $ty {
                fn arg_type() -> ArgType {
                    ArgType::named($name)
                }
            }
        )*
    };
}

named_inputs!("Int" => i8, i16, i32, i64, u8, u16, u32);
named_inputs!("Float" => f32, f64);
named_inputs!("Boolean" => bool);
// plain text binds as ID: many servers declare textual identifiers as ID,
// use scalar::GqlString where the server expects String
named_inputs!("ID" => String, str);

impl<T: InputType> InputType for Option<T> {
    fn arg_type() -> ArgType {
        ArgType::optional(T::arg_type())
    }
}

impl<T: InputType> InputType for Vec<T> {
    fn arg_type() -> ArgType {
        ArgType::list(T::arg_type())
    }
}

impl<T: InputType> InputType for [T] {
    fn arg_type() -> ArgType {
        ArgType::list(T::arg_type())
    }
}

impl<T: InputType, const N: usize> InputType for [T; N] {
    fn arg_type() -> ArgType {
        ArgType::list(T::arg_type())
    }
}

impl<T: InputType + ?Sized> InputType for &T {
    fn arg_type() -> ArgType {
        T::arg_type()
    }
}

impl<T: InputType + ?Sized> InputType for Box<T> {
    fn arg_type() -> ArgType {
        T::arg_type()
    }
}

impl<T: InputType + ?Sized> InputType for Arc<T> {
    fn arg_type() -> ArgType {
        T::arg_type()
    }
}

/// a bound variable
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    arg_type: ArgType,
    value: serde_json::Value,
}

impl Variable {
    pub fn arg_type(&self) -> &ArgType {
        &self.arg_type
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }
}

/// variable name -> typed value.
///
/// names iterate in lexicographic order, so the rendered header does not
/// depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    entries: BTreeMap<String, Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// bind a value, deriving its graphql type from the rust type.
    ///
    /// rebinding a name replaces the previous value.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: &T) -> Result<()>
    where
        T: InputType + Serialize + ?Sized,
    {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|source| Error::Variable {
            name: name.clone(),
            source,
        })?;
        self.insert_typed(name, T::arg_type(), value);
        Ok(())
    }

    /// builder form of [`Variables::insert`]
    pub fn with<T>(mut self, name: impl Into<String>, value: T) -> Result<Self>
    where
        T: InputType + Serialize,
    {
        self.insert(name, &value)?;
        Ok(self)
    }

    /// bind a raw json value under an explicit graphql type
    pub fn insert_typed(
        &mut self,
        name: impl Into<String>,
        arg_type: ArgType,
        value: serde_json::Value,
    ) {
        self.entries.insert(name.into(), Variable { arg_type, value });
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.entries.iter().map(|(name, variable)| (name.as_str(), variable))
    }

    /// render the minified declaration header, e.g. `$a:Int!$b:Boolean`.
    ///
    /// no commas are written; they are insignificant in graphql.
    pub fn header(&self) -> String {
        let mut out = String::new();
        for (name, variable) in &self.entries {
            out.push('$');
            out.push_str(name);
            out.push(':');
            variable.arg_type.write(&mut out, true);
        }
        out
    }

    /// the json object sent as the request `variables`
    pub fn to_json(&self) -> serde_json::Value {
        let values = self
            .entries
            .iter()
            .map(|(name, variable)| (name.clone(), variable.value.clone()))
            .collect();
        serde_json::Value::Object(values)
    }
}
