//! graphql client with typed document synthesis
//!
//! this crate builds minified graphql documents from a typed description of
//! the data you want back, then posts them with a small client. describe a
//! response with [`FieldShape`] (or implement [`Shaped`] for your types),
//! bind variables with [`Variables`], and let [`build_query`] /
//! [`build_mutation`] write the document.
//!
//! ## building documents
//!
//! ```
//! use gql_shape::{build_query, FieldShape, ObjectShape, Variables};
//!
//! let shape = FieldShape::record(
//!     ObjectShape::new("Person")
//!         .field_of::<String>("Name")
//!         .field_of::<Option<i32>>("Age"),
//! );
//! let variables = Variables::new()
//!     .with("id", "abc".to_string())?
//!     .with("active", Some(true))?;
//!
//! assert_eq!(
//!     build_query(&shape, &variables),
//!     "query($active:Boolean$id:ID!){name,age}"
//! );
//! # Ok::<(), gql_shape::Error>(())
//! ```
//!
//! ## quick start
//!
//! ```no_run
//! use gql_shape::{Client, ClientConfig, Variables};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::new("http://localhost:8000/graphql"))?;
//! let response = client.execute_raw("{__typename}", &Variables::new()).await?;
//! println!("{:?}", response.data);
//! # Ok(())
//! # }
//! ```
//!
//! code that only needs to run documents can take any [`GraphQl`]
//! implementation, which keeps a test double one method away.

mod arguments;
mod client;
mod config;
mod document;
mod error;
mod graphql;
mod ident;
mod operation;
pub mod scalar;
mod shape;
mod transport;

pub use arguments::{ArgType, InputType, Variable, Variables};
pub use client::Client;
pub use config::ClientConfig;
pub use document::{build_document, build_mutation, build_query, selection_set};
pub use error::{Error, Result};
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlResponse};
pub use ident::to_lower_camel_case;
pub use operation::{Operation, OperationKind};
pub use shape::{FieldShape, Member, ObjectRef, ObjectShape, Shaped};
pub use transport::GraphQl;
