pub mod classification;
pub mod engine;
pub mod parameters;
pub mod table;
pub mod validation;
