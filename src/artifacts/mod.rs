pub mod merge;
pub mod objects;
