//! explicit scalar newtypes
//!
//! plain `String` variables bind as `ID`. wrap text in [`GqlString`] when
//! the server declares the argument as `String`.

use crate::arguments::{ArgType, InputType};
use crate::shape::{FieldShape, Shaped};
use serde::{Deserialize, Serialize};
use std::fmt;

/// text bound as the graphql `String` type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GqlString(pub String);

/// text bound as the graphql `ID` type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub String);

macro_rules! text_scalar {
    ($ty:ident, $name:literal) => {
        impl InputType for $ty {
            fn arg_type() -> ArgType {
                ArgType::named($name)
            }
        }

        impl Shaped for $ty {
            fn shape() -> FieldShape {
                FieldShape::Scalar
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_scalar!(GqlString, "String");
text_scalar!(Id, "ID");
