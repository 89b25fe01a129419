use crate::check::CheckError;

/// Result of a builder operation.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Errors raised while consuming the event protocol.
///
/// Everything except [`BuildError::NamespaceMismatch`] and
/// [`BuildError::Unsupported`] means the producer and the builder disagree on
/// the grammar; the builder refuses further events until it is cleared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("`{event}` with an empty construction stack")]
    StackUnderflow { event: &'static str },

    #[error("`{event}` expected {expected}, found {found}")]
    UnexpectedNode {
        event: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{event}` without an open slot")]
    NoPendingSlot { event: &'static str },

    #[error("`{event}` while slot {index} is still open")]
    SlotStillOpen { event: &'static str, index: usize },

    #[error("`{event}` after the slot already received an expression")]
    ExtraExpression { event: &'static str },

    #[error("slot {index} is out of range for `{owner}` with {len} slots")]
    SlotOutOfRange {
        owner: String,
        index: usize,
        len: usize,
    },

    #[error("slot {index} of `{owner}` is already filled")]
    SlotAlreadyFilled { owner: String, index: usize },

    #[error("element {index} of `{owner}` arrived out of order, expected {expected}")]
    ElementOutOfOrder {
        owner: String,
        index: usize,
        expected: usize,
    },

    #[error("`{owner}` closed with {filled} of {declared} slots filled")]
    IncompleteCall {
        owner: String,
        filled: usize,
        declared: usize,
    },

    #[error("`{owner}` declares {expected} elements, received {found}")]
    SizeMismatch {
        owner: String,
        expected: usize,
        found: usize,
    },

    #[error("`{event}` without an expression")]
    MissingExpression { event: &'static str },

    #[error("`{event}` with {depth} unfinished constructs on the stack")]
    Unbalanced { event: &'static str, depth: usize },

    #[error("`{event}` outside of {scope}")]
    Outside {
        event: &'static str,
        scope: &'static str,
    },

    #[error("`{event}` while {open} is still open")]
    StillOpen {
        event: &'static str,
        open: &'static str,
    },

    #[error("{kind} index {index} out of order, expected {expected}")]
    IndexOutOfOrder {
        kind: &'static str,
        index: u32,
        expected: u32,
    },

    #[error("material `{0}` is defined twice")]
    DuplicateMaterial(String),

    #[error("parameter `{0}` is declared twice")]
    DuplicateParameter(String),

    #[error("field `{0}` is assigned twice")]
    DuplicateField(String),

    #[error("enum `{ty}` declares value {value} twice")]
    DuplicateEnumValue { ty: String, value: i32 },

    #[error("structure type `{0}` is not registered")]
    UnknownStructure(String),

    #[error("reference to undeclared parameter {0}")]
    UnknownParameter(u32),

    #[error("reference to undeclared temporary {0}")]
    UnknownTemporary(u32),

    #[error("{context}: {source}")]
    Check {
        context: String,
        #[source]
        source: CheckError,
    },

    #[error("`{0}` is not a vector type")]
    InvalidVectorType(String),

    #[error("`{0}` is not a matrix type")]
    InvalidMatrixType(String),

    #[error("vector element must be a float constant, found {found}")]
    NotAFloat { found: &'static str },

    #[error("{0} values are not supported")]
    Unsupported(String),

    #[error("material `{material}` is declared in `{namespace}`, but the file is `{module}`")]
    NamespaceMismatch {
        material: String,
        namespace: String,
        module: String,
    },

    #[error("builder refuses events after an earlier contract violation")]
    Poisoned,
}

impl BuildError {
    /// `true` when the producer and the builder disagree on the grammar.
    ///
    /// Such errors abort the whole run; the others only skip the current file.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            BuildError::NamespaceMismatch { .. } | BuildError::Unsupported(_)
        )
    }
}
