//! Owned model of the schema definitions found in a source file.
//!
//! Every node records the byte ranges of the source text it was built from.
//! Codemods read the model and emit text edits against those ranges; the
//! model itself is never printed back.

use graphql_codemod_types::{Diagnostic, OffsetRange};

/// What kind of collection a [`FieldMap`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Fields of an object or interface type
    Output,
    /// Fields of an input object type or mutation input
    Input,
    /// Arguments of a single field
    Arguments,
    /// Values of an enum type
    EnumValues,
}

impl std::fmt::Display for MapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Output => write!(f, "field"),
            Self::Input => write!(f, "input field"),
            Self::Arguments => write!(f, "arg"),
            Self::EnumValues => write!(f, "enum value"),
        }
    }
}

/// An ordered collection of named entries written as an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub kind: MapKind,
    /// Range of the object literal, braces included
    pub range: OffsetRange,
    pub entries: Vec<MapEntry>,
}

impl FieldMap {
    /// Iterate over the named entries, skipping spreads.
    pub fn fields(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            MapEntry::Field(field) => Some(field),
            MapEntry::Spread { .. } | MapEntry::Unsupported { .. } => None,
        })
    }

    /// Find a named entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldEntry> {
        self.fields().find(|field| field.key == key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries, spreads included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One entry of a [`FieldMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEntry {
    Field(FieldEntry),
    /// `...otherFields`, merged from a collection that cannot be followed
    Spread { label: String, range: OffsetRange },
    /// An entry with a computed key
    Unsupported { range: OffsetRange },
}

/// A named field, argument or enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub key: String,
    pub key_range: OffsetRange,
    /// Written as `{ key }` rather than `{ key: value }`
    pub shorthand: bool,
    /// Range of the whole property
    pub range: OffsetRange,
    pub value: FieldValue,
}

/// The value side of a [`FieldEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// An inline configuration object
    Config(FieldConfig),
    /// A variable reference, e.g. `fieldName: SomeFieldConfig`
    Reference { name: String, range: OffsetRange },
    /// A call producing the configuration, e.g. `markdown(...)`
    Call { callee: String, range: OffsetRange },
    /// Any other expression
    Other { range: OffsetRange },
}

impl FieldValue {
    #[must_use]
    pub const fn config(&self) -> Option<&FieldConfig> {
        match self {
            Self::Config(config) => Some(config),
            _ => None,
        }
    }

    #[must_use]
    pub const fn range(&self) -> OffsetRange {
        match self {
            Self::Config(config) => config.range,
            Self::Reference { range, .. } | Self::Call { range, .. } | Self::Other { range } => {
                *range
            }
        }
    }
}

/// An inline field, argument or enum value configuration object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    /// Range of the object literal, braces included
    pub range: OffsetRange,
    /// Properties in source order
    pub props: Vec<ConfigProp>,
    /// The `type` property, if any
    pub type_expr: Option<TypeExpr>,
    /// The `args` property, if any
    pub args: Option<FieldsSource>,
    /// The `resolve` property, if any
    pub resolve: Option<ResolveProp>,
    /// Whether a `deprecationReason` property is present
    pub deprecated: bool,
}

/// A property of a [`FieldConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigProp {
    /// `None` for spreads and computed keys
    pub name: Option<String>,
    pub range: OffsetRange,
}

/// Shape of the `type` property of a field configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `new GraphQLList(...)`
    List { range: OffsetRange },
    /// A plain identifier, e.g. `GraphQLString` or `ArtworkType`
    Named { name: String, range: OffsetRange },
    Other { range: OffsetRange },
}

impl TypeExpr {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    #[must_use]
    pub const fn range(&self) -> OffsetRange {
        match self {
            Self::List { range } | Self::Named { range, .. } | Self::Other { range } => *range,
        }
    }
}

/// Where the entries of a field or argument map come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldsSource {
    /// An object literal
    Inline(FieldMap),
    /// A thunk returning an object literal
    Deferred(FieldMap),
    /// A variable reference
    ByReference { name: String, range: OffsetRange },
    /// A call that is not a recognised decorator
    ByCall { callee: String, range: OffsetRange },
    /// Anything else, e.g. a thunk with logic before its return
    Unsupported { range: OffsetRange },
}

impl FieldsSource {
    /// The statically known map, if any.
    #[must_use]
    pub const fn map(&self) -> Option<&FieldMap> {
        match self {
            Self::Inline(map) | Self::Deferred(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_map(self) -> Option<FieldMap> {
        match self {
            Self::Inline(map) | Self::Deferred(map) => Some(map),
            _ => None,
        }
    }
}

/// A `resolve` (or `mutateAndGetPayload`) property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveProp {
    /// Range of the whole property
    pub range: OffsetRange,
    /// The function, if it is written inline
    pub function: Option<Resolver>,
}

/// An inline resolver function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    pub range: OffsetRange,
    pub params: Vec<Param>,
    pub body: ResolverBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverBody {
    /// `{ ... }`
    Block {
        range: OffsetRange,
        /// Range of the first statement, if any
        first_statement: Option<OffsetRange>,
    },
    /// An arrow function's expression body
    Expression { range: OffsetRange },
}

/// A resolver parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// `name` or `name: Type`
    Ident { name: String, range: OffsetRange },
    /// `{ a, b: c, ...rest }`
    Object(ObjectParam),
    /// Defaults, array patterns and rest parameters
    Other { kind: &'static str, range: OffsetRange },
}

impl Param {
    #[must_use]
    pub const fn range(&self) -> OffsetRange {
        match self {
            Self::Ident { range, .. } | Self::Other { range, .. } => *range,
            Self::Object(object) => object.range,
        }
    }
}

/// An object destructuring parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectParam {
    pub range: OffsetRange,
    pub props: Vec<PatternProp>,
    pub has_rest: bool,
}

/// One property of an [`ObjectParam`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternProp {
    pub key: String,
    pub key_range: OffsetRange,
    pub binding: PatternBinding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternBinding {
    /// `{ key }` or `{ key = default }`
    Shorthand,
    /// `{ key: binding }`
    Renamed,
}

/// A relay mutation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationConfig {
    pub range: OffsetRange,
    /// Index into [`SchemaDefinitions::input_maps`]
    pub input_map: Option<usize>,
    /// Index into [`SchemaDefinitions::output_maps`]
    pub output_map: Option<usize>,
    /// The `mutateAndGetPayload` property
    pub payload_resolver: Option<ResolveProp>,
}

/// A field configuration declared as its own variable, e.g.
/// `export const Artist: GraphQLFieldConfig<...> = { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFieldConfig {
    pub name: String,
    pub config: FieldConfig,
}

/// All statically located definitions of one source file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDefinitions {
    pub output_maps: Vec<FieldMap>,
    pub input_maps: Vec<FieldMap>,
    /// Argument maps declared as their own variable
    pub argument_maps: Vec<FieldMap>,
    pub field_configs: Vec<NamedFieldConfig>,
    pub mutations: Vec<MutationConfig>,
    /// The `values` of every enum type constructor
    pub enum_values: Vec<FieldsSource>,
    /// Soft warnings about definitions that could not be followed
    pub diagnostics: Vec<Diagnostic>,
}

impl SchemaDefinitions {
    /// Every field configuration reachable from an output field map, followed
    /// by the standalone field configurations.
    pub fn output_field_configs(&self) -> impl Iterator<Item = &FieldConfig> {
        self.output_maps
            .iter()
            .flat_map(FieldMap::fields)
            .filter_map(|field| field.value.config())
            .chain(self.field_configs.iter().map(|named| &named.config))
    }
}
