pub mod cli;
pub mod interrupt;
pub mod json;
pub mod logger;
pub mod numbers;
pub mod prompt;
pub mod report;
pub mod validation;
