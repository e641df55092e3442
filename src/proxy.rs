//! Dispatch proxy: routes a type-erased invocation to a handler resolved at
//! runtime.
//!
//! The proxy is a pure pass-through. Arguments reach the handler still
//! encoded, the handler's result comes back verbatim, and a handler-raised
//! failure is exactly the failure the caller sees.

use tracing::debug;

use crate::codec::EncodedValues;
use crate::error::WorkflowError;
use crate::registry::{DynamicWorkflow, WorkflowRegistry};

/// One execution request, as handed over by the transport layer.
///
/// Created once per request and consumed exactly once by
/// [`DynamicWorkflowProxy::dispatch`].
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Name of the workflow type whose handler services this request.
    pub workflow_type: String,
    /// Encoded argument payload, forwarded to the handler unmodified.
    pub args: EncodedValues,
    /// Opaque correlation token from the transport layer. Carried into
    /// tracing fields only, never interpreted here.
    pub correlation: Option<String>,
}

impl Invocation {
    pub fn new(workflow_type: impl Into<String>, args: EncodedValues) -> Self {
        Self {
            workflow_type: workflow_type.into(),
            args,
            correlation: None,
        }
    }

    pub fn with_correlation(mut self, token: impl Into<String>) -> Self {
        self.correlation = Some(token.into());
        self
    }
}

/// Exclusive pairing of one handler instance with one invocation.
///
/// `execute` consumes the binding, so a handler instance cannot outlive or
/// be reused across invocations; it is dropped as soon as the handler
/// returns.
struct HandlerBinding {
    handler: Box<dyn DynamicWorkflow>,
}

impl HandlerBinding {
    fn new(handler: Box<dyn DynamicWorkflow>) -> Self {
        Self { handler }
    }

    async fn execute(self, args: EncodedValues) -> Result<String, WorkflowError> {
        self.handler.execute(args).await
    }
}

/// Routes invocations to handlers resolved by workflow-type name.
///
/// Holds no per-call state: each `invoke` resolves a factory, constructs one
/// handler bound solely to that call, awaits it, and drops the binding.
/// Concurrent invocations share the proxy freely.
#[derive(Clone)]
pub struct DynamicWorkflowProxy {
    registry: WorkflowRegistry,
}

impl DynamicWorkflowProxy {
    pub fn new(registry: WorkflowRegistry) -> Self {
        Self { registry }
    }

    /// The registry this proxy resolves against.
    pub fn registry(&self) -> &WorkflowRegistry {
        &self.registry
    }

    /// Resolve a handler for `workflow_type` and forward `args` to it.
    ///
    /// Fails with [`WorkflowError::UnknownWorkflowType`] before any handler
    /// is constructed when the name is unregistered, and with
    /// [`WorkflowError::HandlerConstruction`] when the factory fails. Any
    /// failure the handler itself raises is returned unchanged.
    pub async fn invoke(
        &self,
        workflow_type: &str,
        args: EncodedValues,
    ) -> Result<String, WorkflowError> {
        let factory = self.registry.resolve(workflow_type)?;
        let handler = factory
            .create()
            .map_err(|reason| WorkflowError::handler_construction(workflow_type, reason))?;
        debug!(workflow_type, argc = args.len(), "dispatch workflow");
        HandlerBinding::new(handler).execute(args).await
    }

    /// Dispatch one [`Invocation`], tracing its correlation token.
    pub async fn dispatch(&self, invocation: Invocation) -> Result<String, WorkflowError> {
        let Invocation {
            workflow_type,
            args,
            correlation,
        } = invocation;
        debug!(workflow_type = %workflow_type, correlation = ?correlation, "dispatch invocation");
        self.invoke(&workflow_type, args).await
    }
}
