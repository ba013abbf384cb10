pub mod builder;
pub mod format;
