//! Straightforward serialization of the object model.
//!
//! Objects are written in their canonical form, dictionaries in key order, so
//! the same object always produces the same bytes.

pub mod object;

pub struct SimpleEncoder;
