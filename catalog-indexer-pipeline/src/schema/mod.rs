//! Permitted simple document fields.
//!
//! The set of scalar fields a product document may carry is declared by a
//! service interface rather than hard-coded, so it cannot drift from the
//! interface the rest of the system validates against.

use std::sync::{Arc, OnceLock};

use tracing::{debug, error};

use catalog_indexer_repository::InterfaceDescriptorLookup;

/// Lazily resolved, cached list of permitted simple document fields.
///
/// Resolution happens on first use and is never repeated. If the interface
/// cannot be described the failure is logged as fatal and an empty list is
/// cached: documents then carry no simple fields until the configuration is
/// fixed and the process restarted.
pub struct SchemaFieldRegistry {
    lookup: Arc<dyn InterfaceDescriptorLookup>,
    interface_name: String,
    fields: OnceLock<Arc<[String]>>,
}

impl SchemaFieldRegistry {
    pub fn new(lookup: Arc<dyn InterfaceDescriptorLookup>, interface_name: impl Into<String>) -> Self {
        Self {
            lookup,
            interface_name: interface_name.into(),
            fields: OnceLock::new(),
        }
    }

    /// Name of the interface the fields are read from.
    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    /// Permitted field names, in declaration order.
    ///
    /// Safe to call from many workers at once; concurrent first callers wait
    /// for a single resolution.
    pub fn permitted_fields(&self) -> Arc<[String]> {
        self.fields.get_or_init(|| self.resolve()).clone()
    }

    fn resolve(&self) -> Arc<[String]> {
        match self.lookup.describe(&self.interface_name) {
            Ok(descriptor) => {
                let names = descriptor.input_parameter_names(true, false);
                debug!(
                    interface = %self.interface_name,
                    fields = ?names,
                    "Resolved permitted document fields"
                );
                names.into()
            }
            Err(e) => {
                error!(
                    severity = "fatal",
                    interface = %self.interface_name,
                    error = %e,
                    "Could not describe document field interface; documents will carry no simple fields"
                );
                Arc::from(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_indexer_repository::{ParameterDescriptor, RepositoryError, ServiceDescriptor};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    struct CountingLookup {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingLookup {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl InterfaceDescriptorLookup for CountingLookup {
        fn describe(&self, interface_name: &str) -> Result<ServiceDescriptor, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RepositoryError::configuration("no such service"));
            }
            Ok(ServiceDescriptor {
                name: interface_name.to_string(),
                parameters: vec![
                    ParameterDescriptor::input("productId"),
                    ParameterDescriptor::internal("userLogin"),
                    ParameterDescriptor::input("inStock"),
                ],
            })
        }
    }

    #[test]
    fn test_fields_exclude_internal_parameters() {
        let registry = SchemaFieldRegistry::new(Arc::new(CountingLookup::new(false)), "attrs");
        assert_eq!(
            registry.permitted_fields().to_vec(),
            vec!["productId".to_string(), "inStock".to_string()]
        );
    }

    #[test]
    fn test_resolved_once_and_cached() {
        let lookup = Arc::new(CountingLookup::new(false));
        let registry = SchemaFieldRegistry::new(lookup.clone(), "attrs");

        let first = registry.permitted_fields();
        let second = registry.permitted_fields();

        assert_eq!(first, second);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_caches_empty_list() {
        let lookup = Arc::new(CountingLookup::new(true));
        let registry = SchemaFieldRegistry::new(lookup.clone(), "attrs");

        assert!(registry.permitted_fields().is_empty());
        assert!(registry.permitted_fields().is_empty());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_access() {
        let lookup = Arc::new(CountingLookup::new(false));
        let registry = Arc::new(SchemaFieldRegistry::new(lookup.clone(), "attrs"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || registry.permitted_fields().to_vec())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["productId", "inStock"]);
        }
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }
}
