/// Errors raised while formatting a completed tree.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("`{call}` is missing operand {index}")]
    MissingOperand { call: String, index: usize },

    #[error("operator `{call}` cannot take {arity} operands")]
    UnsupportedArity { call: String, arity: usize },

    #[error("positional argument of `{call}` is named `{name}`, expected a number")]
    NonNumericPositional { call: String, name: String },

    #[error("argument {index} of `{call}` has no declared slot")]
    SlotOutOfRange { call: String, index: usize },

    #[error("matrix without columns")]
    EmptyMatrix,

    #[error("matrix columns differ in length")]
    RaggedMatrix,

    #[error("float `{0}` has no literal form")]
    NonFiniteFloat(f32),

    #[error("reference to undeclared parameter {0}")]
    DanglingParameter(u32),

    #[error("reference to undeclared temporary {0}")]
    DanglingTemporary(u32),

    #[error("material `{material}`: {source}")]
    Material {
        material: String,
        #[source]
        source: Box<FormatError>,
    },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
