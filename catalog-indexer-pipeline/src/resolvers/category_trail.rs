//! Category trails and the catalogs that own them.
//!
//! A trail entry is `<depth>/<root>/.../<category>`, where depth is the
//! zero-based position of the last segment. A product in category `b` under
//! root `a` gets the entries `0/a` and `1/a/b`, which lets a search filter on
//! any level of the hierarchy with a single prefix query.

use std::sync::Arc;

use tracing::debug;

use super::UniqueList;
use catalog_indexer_repository::{
    CatalogMembershipProvider, CategoryHierarchyProvider, RepositoryError,
};

/// Depth-prefixed path strings for every level of one root-to-leaf trail.
pub fn depth_prefixed_paths(trail: &[String]) -> Vec<String> {
    let mut path = String::new();
    let mut depth = 0usize;

    trail
        .iter()
        .map(|segment| {
            if !path.is_empty() {
                path.push('/');
                depth += 1;
            }
            path.push_str(segment);
            format!("{}/{}", depth, path)
        })
        .collect()
}

/// Root category id of a trail entry: the first segment after the depth
/// prefix. An entry without a prefix is returned whole.
pub fn root_category(entry: &str) -> &str {
    entry.split('/').nth(1).unwrap_or(entry)
}

/// Expands category memberships into trail entries and owning catalogs.
pub struct CategoryTrailResolver {
    hierarchy: Arc<dyn CategoryHierarchyProvider>,
    catalogs: Arc<dyn CatalogMembershipProvider>,
}

impl CategoryTrailResolver {
    pub fn new(
        hierarchy: Arc<dyn CategoryHierarchyProvider>,
        catalogs: Arc<dyn CatalogMembershipProvider>,
    ) -> Self {
        Self { hierarchy, catalogs }
    }

    /// Trail entries of every category the product belongs to.
    ///
    /// Entries shared by several trails (a common ancestor reached through
    /// two memberships) appear once, at their first position.
    pub fn resolve_trails(&self, product_id: &str) -> Result<Vec<String>, RepositoryError> {
        let mut entries = UniqueList::default();

        for category_id in self.hierarchy.memberships(product_id)? {
            for trail in self.hierarchy.trails(&category_id)? {
                for entry in depth_prefixed_paths(&trail) {
                    entries.push(entry);
                }
            }
        }

        let entries = entries.into_vec();
        debug!(product_id, trail_count = entries.len(), "Resolved category trails");
        Ok(entries)
    }

    /// Catalogs owning the root category of any trail entry, first seen first.
    pub fn resolve_catalogs(&self, trails: &[String]) -> Result<Vec<String>, RepositoryError> {
        let mut roots = UniqueList::default();
        for entry in trails {
            roots.push(root_category(entry).to_string());
        }

        let mut catalogs = UniqueList::default();
        for root in roots.into_vec() {
            for catalog_id in self.catalogs.catalogs_of(&root)? {
                catalogs.push(catalog_id);
            }
        }
        Ok(catalogs.into_vec())
    }
}
