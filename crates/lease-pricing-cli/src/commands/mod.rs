pub mod pricing;
pub mod quote;
