pub mod diagnostic;
pub mod document;
pub mod naming;
pub mod schema;
pub mod types;
