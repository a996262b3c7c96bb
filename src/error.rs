/// Errors raised when a complex tensor operation receives invalid operands.
///
/// Every failure is a contract violation detected eagerly, before any work is handed
/// to the backend.
#[derive(thiserror::Error, Debug)]
pub enum CplxError {
    /// An operand has the wrong kind, e.g. an integer where a tensor or float is expected.
    #[error("TypeError: {0}")]
    Type(String),

    /// An operand has the right kind but an invalid value, e.g. mismatched shapes.
    #[error("ValueError: {0}")]
    Value(String),

    /// An index is out of range for the axis it addresses.
    #[error("IndexError: {0}")]
    Index(String),

    /// Host data could not be arranged into the requested array shape.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
