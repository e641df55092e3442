//! Dynamic-invocation dispatch for a workflow execution runtime.
//!
//! An incoming invocation carries only a workflow-type name and an opaque,
//! encoded argument payload. This crate routes it to a concrete handler
//! chosen at runtime while keeping the guarantees of a statically-bound
//! handler: one fresh instance per invocation, lazily decoded arguments,
//! and verbatim propagation of the handler's result or failure.
//!
//! Three pieces compose the pipeline:
//!
//! - [`WorkflowRegistry`]: workflow-type name -> handler factory, built once
//!   at startup and immutable afterwards.
//! - [`EncodedValues`]: ordered, opaque encoded arguments with per-element,
//!   shape-parameterized decoding.
//! - [`DynamicWorkflowProxy`]: resolves, constructs one handler bound to the
//!   call, forwards the still-encoded arguments, returns the outcome.
//!
//! ```rust,no_run
//! use dynflow::{DynamicWorkflowProxy, EncodedValues, WorkflowRegistry};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = WorkflowRegistry::builder()
//!     .register_fn("Greet", |args: EncodedValues| async move {
//!         let who: String = args.get(0)?;
//!         Ok(format!("Hello, {who}"))
//!     })
//!     .build()?;
//!
//! let proxy = DynamicWorkflowProxy::new(registry);
//! let args = EncodedValues::empty().with(&"World")?;
//! let greeting = proxy.invoke("Greet", args).await?;
//! assert_eq!(greeting, "Hello, World");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod proxy;
pub mod registry;

pub use codec::{Codec, EncodedValues, Json};
pub use error::{RegistryError, WorkflowError};
pub use proxy::{DynamicWorkflowProxy, Invocation};
pub use registry::{
    DynamicWorkflow, FnFactory, FnWorkflow, WorkflowFactory, WorkflowRegistry,
    WorkflowRegistryBuilder,
};
