// Domain layer: the citation model and the entities it holds.

pub mod citant;
pub mod fields;
pub mod model;

pub use citant::{classify, Citant, Entity, Person};
pub use fields::{DateInput, FieldValue};
pub use model::{Model, ALLOWED_FIELDS, DEFAULT_MESSAGE, DEFAULT_SPEC_VERSION};
