//! Service interface descriptor lookup.

use crate::errors::RepositoryError;
use crate::types::ServiceDescriptor;

/// Resolves the declared shape of a named service interface.
pub trait InterfaceDescriptorLookup: Send + Sync {
    /// Describe `interface_name`.
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceDescriptor)` - The declared parameters
    /// * `Err(RepositoryError::ConfigurationError)` - If no such interface is defined
    fn describe(&self, interface_name: &str) -> Result<ServiceDescriptor, RepositoryError>;
}
