pub mod classify;
pub mod json;
pub mod parser;
pub mod search;
pub mod terminal;
pub mod violation;
pub mod yaml;
