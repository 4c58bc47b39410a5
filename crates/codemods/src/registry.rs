//! Registry of all available codemods

use crate::migrate_ids::MigrateIds;
use crate::prune_deprecated::PruneDeprecated;
use crate::relay_raw_response::RelayRawResponse;
use crate::rename_client_fields::RenameClientFields;
use crate::rename_definitions::RenameDefinitions;
use crate::unify_pagination::UnifyPagination;
use crate::Codemod;
use std::sync::{Arc, LazyLock};

/// Lazily initialized codemods.
/// Codemods are created once and reused across all files.
static CODEMODS: LazyLock<Vec<Arc<dyn Codemod>>> = LazyLock::new(|| {
    vec![
        Arc::new(RenameDefinitions),
        Arc::new(RenameClientFields),
        Arc::new(PruneDeprecated),
        Arc::new(UnifyPagination),
        Arc::new(MigrateIds),
        Arc::new(RelayRawResponse),
    ]
});

#[must_use]
pub fn all_codemods() -> &'static [Arc<dyn Codemod>] {
    &CODEMODS
}

#[must_use]
pub fn find_codemod(name: &str) -> Option<&'static Arc<dyn Codemod>> {
    all_codemods().iter().find(|codemod| codemod.name() == name)
}

#[must_use]
pub fn all_codemod_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = all_codemods()
        .iter()
        .map(|codemod| codemod.name())
        .collect();
    names.sort_unstable();
    names
}
