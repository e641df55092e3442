/// Failure channel shared by the dispatch pipeline and the handlers it runs.
///
/// Dispatch-detected failures (unknown workflow type, handler construction,
/// argument decoding) and handler-raised failures travel through the same
/// type. The dispatch proxy returns whatever error value the handler
/// produced, so upstream failure classification (e.g. retryable vs terminal)
/// always operates on the original failure, never on a proxy-introduced
/// wrapper.
///
/// # Example Usage
///
/// ```rust,no_run
/// use dynflow::WorkflowError;
///
/// // Raised by the registry when a name was never registered
/// # fn example() -> Result<(), WorkflowError> {
/// return Err(WorkflowError::unknown_workflow_type("Greet"));
/// # }
///
/// // Raised by a handler; passes through the proxy untouched
/// # fn example2() -> Result<(), WorkflowError> {
/// return Err(WorkflowError::application("validation", "amount must be positive"));
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// No registry entry exists for the requested workflow-type name.
    /// Surfaced before any handler instance is constructed.
    UnknownWorkflowType { name: String },
    /// The resolved factory failed to produce a handler instance.
    HandlerConstruction { name: String, reason: String },
    /// An element of the encoded argument set is incompatible with the
    /// requested shape (out-of-range index or structural mismatch).
    Decode { index: usize, reason: String },
    /// A failure raised by the handler itself; opaque to the dispatch layer.
    Application { kind: String, message: String },
}

impl WorkflowError {
    pub fn unknown_workflow_type(name: impl Into<String>) -> Self {
        Self::UnknownWorkflowType { name: name.into() }
    }

    pub fn handler_construction(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HandlerConstruction {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn decode(index: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            index,
            reason: reason.into(),
        }
    }

    /// Create a handler-raised failure with a caller-chosen kind and message.
    pub fn application(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Application {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Check whether this failure means the workflow-type name was never registered.
    pub fn is_unknown_workflow_type(&self) -> bool {
        matches!(self, Self::UnknownWorkflowType { .. })
    }
}

impl std::fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownWorkflowType { name } => write!(f, "unregistered:{name}"),
            Self::HandlerConstruction { name, reason } => {
                write!(f, "handler construction failed for {name}: {reason}")
            }
            Self::Decode { index, reason } => write!(f, "decode at index {index}: {reason}"),
            Self::Application { kind, message } => write!(f, "{kind}: {message}"),
        }
    }
}

impl std::error::Error for WorkflowError {}

/// Error surfaced when building a [`WorkflowRegistry`](crate::WorkflowRegistry).
///
/// Duplicate registrations are collected during the registration phase and
/// reported together at build time, so a misconfigured worker fails at
/// startup rather than shadowing one handler with another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateRegistration { names: Vec<String> },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateRegistration { names } => {
                write!(f, "duplicate workflow registration: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for RegistryError {}
