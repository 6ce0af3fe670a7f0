//! Declarative scene description consumed by every other component.

pub(crate) mod dsl;
pub(crate) mod model;
