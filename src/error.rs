use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, SdfError>;

#[derive(Debug, Display, From)]
#[display("{self:?}")]
pub enum SdfError {
    /// A union, difference or intersection was built without children.
    EmptyCombinator,
    /// The transform matrix has no inverse.
    SingularMatrix,
    /// Scale factors must be finite and strictly positive.
    InvalidScale,
    /// Every repeat step component must be finite and strictly positive.
    InvalidStep,
    /// Cone radii must be non-negative and the rounding must fit in half the height.
    InvalidCone,
    /// Sampling needs a finite, non-empty box.
    UnboundedRegion,
    /// Cell sizes must be finite and strictly positive.
    InvalidCellSize,
    /// The sampling grid has more corners than can be allocated.
    GridTooLarge,
    EmptyMesh,
    #[from]
    Io(std::io::Error),
}

impl std::error::Error for SdfError {}
