//! Names the locator recognises in source code.

use serde::{Deserialize, Serialize};

/// Constructor, helper and type names that identify schema definitions.
///
/// Defaults follow `graphql-js` and `graphql-relay` naming. Projects wrapping
/// these in their own helpers can extend the lists through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vocabulary {
    /// Constructors whose `fields` hold output fields
    pub object_types: Vec<String>,
    /// Constructors whose `fields` hold input fields
    pub input_object_types: Vec<String>,
    /// Constructors whose `values` hold enum values
    pub enum_types: Vec<String>,
    /// Constructors wrapping a list type
    pub list_types: Vec<String>,
    /// Calls taking a mutation configuration as first argument
    pub mutation_helpers: Vec<String>,
    /// Calls wrapping an argument map, e.g. pagination argument helpers
    pub argument_decorators: Vec<String>,
    /// Variable type annotations marking an output field map
    pub field_config_map_types: Vec<String>,
    /// Variable type annotations marking an input field map
    pub input_field_config_map_types: Vec<String>,
    /// Variable type annotations marking an argument map
    pub argument_map_types: Vec<String>,
    /// Variable type annotations marking a single field configuration
    pub field_config_types: Vec<String>,
    /// Variable type annotations marking a mutation configuration
    pub mutation_config_types: Vec<String>,
    /// Generic types wrapping a map type as `Thunk<Map>`
    pub thunk_types: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn has(list: &[String], name: &str) -> bool {
    list.iter().any(|candidate| candidate == name)
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            object_types: names(&["GraphQLObjectType", "GraphQLInterfaceType"]),
            input_object_types: names(&["GraphQLInputObjectType"]),
            enum_types: names(&["GraphQLEnumType"]),
            list_types: names(&["GraphQLList"]),
            mutation_helpers: names(&["mutationWithClientMutationId"]),
            argument_decorators: names(&["pageable"]),
            field_config_map_types: names(&["GraphQLFieldConfigMap"]),
            input_field_config_map_types: names(&["GraphQLInputFieldConfigMap"]),
            argument_map_types: names(&["GraphQLFieldConfigArgumentMap"]),
            field_config_types: names(&["GraphQLFieldConfig"]),
            mutation_config_types: names(&["MutationConfig"]),
            thunk_types: names(&["Thunk"]),
        }
    }
}

impl Vocabulary {
    #[must_use]
    pub fn is_object_type(&self, name: &str) -> bool {
        has(&self.object_types, name)
    }

    #[must_use]
    pub fn is_input_object_type(&self, name: &str) -> bool {
        has(&self.input_object_types, name)
    }

    #[must_use]
    pub fn is_enum_type(&self, name: &str) -> bool {
        has(&self.enum_types, name)
    }

    #[must_use]
    pub fn is_list_type(&self, name: &str) -> bool {
        has(&self.list_types, name)
    }

    #[must_use]
    pub fn is_mutation_helper(&self, name: &str) -> bool {
        has(&self.mutation_helpers, name)
    }

    #[must_use]
    pub fn is_argument_decorator(&self, name: &str) -> bool {
        has(&self.argument_decorators, name)
    }

    #[must_use]
    pub fn is_thunk_type(&self, name: &str) -> bool {
        has(&self.thunk_types, name)
    }

    /// Classify a variable's type annotation.
    #[must_use]
    pub fn declaration_kind(&self, type_name: &str) -> Option<DeclarationKind> {
        if has(&self.field_config_map_types, type_name) {
            Some(DeclarationKind::OutputFieldMap)
        } else if has(&self.input_field_config_map_types, type_name) {
            Some(DeclarationKind::InputFieldMap)
        } else if has(&self.argument_map_types, type_name) {
            Some(DeclarationKind::ArgumentMap)
        } else if has(&self.field_config_types, type_name) {
            Some(DeclarationKind::FieldConfig)
        } else if has(&self.mutation_config_types, type_name) {
            Some(DeclarationKind::MutationConfig)
        } else {
            None
        }
    }
}

/// What a type-annotated variable declaration defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    OutputFieldMap,
    InputFieldMap,
    ArgumentMap,
    FieldConfig,
    MutationConfig,
}
