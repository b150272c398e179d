//! Category hierarchy and catalog membership lookups.

use crate::errors::RepositoryError;

/// Resolves which categories a product belongs to and how those categories
/// hang off the category roots.
pub trait CategoryHierarchyProvider: Send + Sync {
    /// Ids of the categories the product is a direct member of.
    ///
    /// # Arguments
    ///
    /// * `product_id` - The product's identifier
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Category ids, possibly empty
    /// * `Err(RepositoryError)` - If the membership lookup fails
    fn memberships(&self, product_id: &str) -> Result<Vec<String>, RepositoryError>;

    /// Every ancestor trail of a category.
    ///
    /// A category reachable from several roots yields several trails. Each
    /// trail is ordered from the root down to `category_id` itself.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Vec<String>>)` - Root-to-leaf id sequences, possibly empty
    /// * `Err(RepositoryError)` - If the hierarchy lookup fails
    fn trails(&self, category_id: &str) -> Result<Vec<Vec<String>>, RepositoryError>;
}

/// Resolves the catalogs that own a category.
pub trait CatalogMembershipProvider: Send + Sync {
    /// Ids of the catalogs `category_id` is attached to.
    fn catalogs_of(&self, category_id: &str) -> Result<Vec<String>, RepositoryError>;
}
