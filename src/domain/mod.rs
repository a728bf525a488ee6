pub mod dom;
pub mod snippets;
pub mod store;
