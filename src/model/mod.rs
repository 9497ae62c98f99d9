pub mod filter;
pub mod token;
