pub mod diagnostics;
pub mod error;
pub mod page;
pub mod parser;
