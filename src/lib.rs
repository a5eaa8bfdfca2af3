pub mod bounds;
pub mod chunk;
pub mod csg;
pub mod error;
pub mod interp;
pub mod march;
pub mod mesh;
pub mod primitives;
pub mod ray;
pub mod sdf;
pub mod shape;
pub mod transforms;
pub mod types;
pub mod utils;

pub use sdf::{Sdf, SignedDistance};
pub use shape::{Hit, SdfShape, Shape, TraceConfig};
