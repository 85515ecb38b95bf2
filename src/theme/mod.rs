//! Design token data model and merge semantics.
//!
//! A [`TokenSet`] groups colors, font families, shadows, animations and
//! keyframes. Sets are read from generator-style JSON documents and deep
//! merged over a base set before a [`crate::registry::TokenRegistry`]
//! validates them.

mod schema;
pub use schema::*;

mod deserializers;

mod merge;

mod ext;
pub use ext::*;

mod kinds;
pub use kinds::*;
