//! Primitive data types and the type registry.

mod primitive;
mod registry;

pub use primitive::PrimitiveType;
pub use registry::{TypeRegistry, TypeSet};
