//! Domain models for KeepNote.
//!
//! - [`Note`]: the single persisted entity, a short text note with a free-form status.
//! - [`NewNote`]: a note that has not been assigned an id by the store yet.
//! - [`NoteFields`]: user-submitted text fields that passed validation.
//! - [`ValidationError`]: why a submitted form was rejected.

mod note;
mod validation;

pub use note::*;
pub use validation::*;
