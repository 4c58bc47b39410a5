//! Locating GraphQL schema definitions in TypeScript/JavaScript sources.
//!
//! Schemas built with `graphql-js` constructors spread their field maps over
//! many syntactic shapes: object literals, thunks, typed variable
//! declarations and helper calls. [`locate`] walks a parsed source and
//! builds an owned [`SchemaDefinitions`] model of every map it can follow,
//! recording byte ranges so codemods can rewrite the original text in place.
//!
//! Shapes that are legal but cannot be followed statically (spreads,
//! variable references) are reported as diagnostics. Shapes that break the
//! locator's assumptions are a [`LocateError`].

mod error;
mod locator;
mod model;
mod vocabulary;

pub use error::{LocateError, Result};
pub use locator::locate;
pub use model::{
    ConfigProp, FieldConfig, FieldEntry, FieldMap, FieldValue, FieldsSource, MapEntry, MapKind,
    MutationConfig, NamedFieldConfig, ObjectParam, Param, PatternBinding, PatternProp,
    ResolveProp, Resolver, ResolverBody, SchemaDefinitions, TypeExpr,
};
pub use vocabulary::{DeclarationKind, Vocabulary};
