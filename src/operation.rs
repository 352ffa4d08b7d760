//! operations
//!
//! an [`Operation`] pairs a root shape with its variables and produces one
//! document.

use crate::arguments::Variables;
use crate::document::build_document;
use crate::shape::{FieldShape, Shaped};

/// graphql operation keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// a query or mutation built from a shape
#[derive(Debug, Clone)]
pub struct Operation {
    kind: OperationKind,
    shape: FieldShape,
    variables: Variables,
}

impl Operation {
    pub fn new(kind: OperationKind, shape: FieldShape, variables: Variables) -> Self {
        Self {
            kind,
            shape,
            variables,
        }
    }

    pub fn query(shape: FieldShape, variables: Variables) -> Self {
        Self::new(OperationKind::Query, shape, variables)
    }

    pub fn mutation(shape: FieldShape, variables: Variables) -> Self {
        Self::new(OperationKind::Mutation, shape, variables)
    }

    /// a query selecting the shape of `T`
    pub fn query_for<T: Shaped + ?Sized>(variables: Variables) -> Self {
        Self::query(T::shape(), variables)
    }

    /// a mutation selecting the shape of `T`
    pub fn mutation_for<T: Shaped + ?Sized>(variables: Variables) -> Self {
        Self::mutation(T::shape(), variables)
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// the minified document text
    pub fn document(&self) -> String {
        build_document(self.kind, &self.shape, &self.variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ObjectShape;

    struct Payload;

    impl Shaped for Payload {
        fn shape() -> FieldShape {
            FieldShape::object("Payload", || ObjectShape::new("Payload").field_of::<bool>("Ok"))
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(OperationKind::Query.keyword(), "query");
        assert_eq!(OperationKind::Mutation.keyword(), "mutation");
    }

    #[test]
    fn test_document_for_type() {
        let op = Operation::mutation_for::<Payload>(Variables::new());
        assert_eq!(op.kind(), OperationKind::Mutation);
        assert_eq!(op.document(), "mutation{ok}");

        let variables = Variables::new().with("limit", 5).unwrap();
        let op = Operation::query_for::<Payload>(variables);
        assert_eq!(op.document(), "query($limit:Int!){ok}");
        assert_eq!(op.variables().len(), 1);
    }
}
