//! Scene schema validation.
//!
//! This module validates invariants on the raw JSON scene before it is decoded into the typed
//! model, so a single pass can report every defect.

pub(crate) mod validate;
