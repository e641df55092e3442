//! Workflow-type registry: maps names to handler factories.
//!
//! Registration happens during a startup phase; the built registry is
//! immutable and shared by `Arc`, so steady-state dispatch reads it
//! concurrently without locking.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::codec::EncodedValues;
use crate::error::{RegistryError, WorkflowError};

/// Trait implemented by workflow handlers that can be invoked by the dispatch proxy.
///
/// One instance services exactly one invocation. The encoded argument set is
/// handed over untouched; the handler decodes the elements it needs, lazily
/// and in any order. The result is an opaque encoded payload returned to the
/// caller verbatim.
#[async_trait]
pub trait DynamicWorkflow: Send + Sync {
    async fn execute(&self, args: EncodedValues) -> Result<String, WorkflowError>;
}

/// Function wrapper that implements `DynamicWorkflow`.
pub struct FnWorkflow<F, Fut>(pub F)
where
    F: Fn(EncodedValues) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<String, WorkflowError>> + Send + 'static;

#[async_trait]
impl<F, Fut> DynamicWorkflow for FnWorkflow<F, Fut>
where
    F: Fn(EncodedValues) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<String, WorkflowError>> + Send + 'static,
{
    async fn execute(&self, args: EncodedValues) -> Result<String, WorkflowError> {
        (self.0)(args).await
    }
}

/// Factory capability producing a fresh handler instance per invocation.
///
/// `create` is called once per dispatch; instances are never pooled or
/// reused. Construction failures are surfaced by the proxy as
/// [`WorkflowError::HandlerConstruction`].
pub trait WorkflowFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn DynamicWorkflow>, String>;
}

/// Function wrapper that implements `WorkflowFactory`.
pub struct FnFactory<F>(pub F)
where
    F: Fn() -> Result<Box<dyn DynamicWorkflow>, String> + Send + Sync + 'static;

impl<F> WorkflowFactory for FnFactory<F>
where
    F: Fn() -> Result<Box<dyn DynamicWorkflow>, String> + Send + Sync + 'static,
{
    fn create(&self) -> Result<Box<dyn DynamicWorkflow>, String> {
        (self.0)()
    }
}

impl std::fmt::Debug for dyn WorkflowFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WorkflowFactory")
    }
}

/// Immutable registry mapping workflow-type names to handler factories.
#[derive(Clone, Default)]
pub struct WorkflowRegistry {
    inner: Arc<HashMap<String, Arc<dyn WorkflowFactory>>>,
}

impl std::fmt::Debug for WorkflowRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowRegistry")
            .field("names", &self.list_names())
            .finish()
    }
}

impl WorkflowRegistry {
    /// Create a new builder for registering workflow types.
    pub fn builder() -> WorkflowRegistryBuilder {
        WorkflowRegistryBuilder {
            map: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Look up the factory for a workflow-type name.
    ///
    /// Fails with [`WorkflowError::UnknownWorkflowType`] when the name was
    /// never registered; no handler instance is constructed on that path.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn WorkflowFactory>, WorkflowError> {
        match self.inner.get(name) {
            Some(factory) => Ok(Arc::clone(factory)),
            None => {
                self.log_registry_miss(name);
                Err(WorkflowError::unknown_workflow_type(name))
            }
        }
    }

    /// Check if a workflow-type name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Count of registered workflow types.
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    /// List all registered workflow-type names.
    pub fn list_names(&self) -> Vec<String> {
        self.inner.keys().cloned().collect()
    }

    fn log_registry_miss(&self, name: &str) {
        tracing::debug!(
            target: "dynflow::registry",
            requested_name = %name,
            registered_count = self.inner.len(),
            registered_names = ?self.list_names(),
            "registry lookup miss"
        );
    }
}

/// Builder for `WorkflowRegistry`.
///
/// Duplicate names are collected as they are registered and reported
/// together when `build` is called.
pub struct WorkflowRegistryBuilder {
    map: HashMap<String, Arc<dyn WorkflowFactory>>,
    duplicates: Vec<String>,
}

impl WorkflowRegistryBuilder {
    /// Register a factory under a workflow-type name.
    pub fn register(mut self, name: impl Into<String>, factory: impl WorkflowFactory + 'static) -> Self {
        let name = name.into();
        if self.map.contains_key(&name) {
            // Report each colliding name once, however often it recurs
            if !self.duplicates.contains(&name) {
                self.duplicates.push(name);
            }
            return self;
        }
        self.map.insert(name, Arc::new(factory));
        self
    }

    /// Register a factory closure under a workflow-type name.
    pub fn register_handler<F>(self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn DynamicWorkflow>, String> + Send + Sync + 'static,
    {
        self.register(name, FnFactory(factory))
    }

    /// Register a closure as the per-invocation handler body.
    ///
    /// Each dispatch gets a fresh `FnWorkflow` wrapping a clone of the
    /// closure, so the one-instance-per-invocation invariant holds for
    /// closure-backed handlers too.
    pub fn register_fn<F, Fut>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(EncodedValues) -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = Result<String, WorkflowError>> + Send + 'static,
    {
        self.register_handler(name, move || {
            Ok(Box::new(FnWorkflow(f.clone())) as Box<dyn DynamicWorkflow>)
        })
    }

    /// Build the immutable registry.
    ///
    /// # Errors
    ///
    /// Fails with [`RegistryError::DuplicateRegistration`] naming every
    /// workflow type that was registered more than once.
    pub fn build(self) -> Result<WorkflowRegistry, RegistryError> {
        if self.duplicates.is_empty() {
            Ok(WorkflowRegistry {
                inner: Arc::new(self.map),
            })
        } else {
            Err(RegistryError::DuplicateRegistration {
                names: self.duplicates,
            })
        }
    }
}
