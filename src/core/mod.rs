pub mod grid;
pub mod interval;
pub mod pricing;
pub mod resolver;
pub mod schedule;
pub mod store;
#[cfg(test)]
mod tests;
pub mod types;
pub mod validator;
