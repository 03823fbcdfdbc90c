pub mod assembler;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod sanitize;
