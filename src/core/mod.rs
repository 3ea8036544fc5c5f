pub mod expansion;
pub mod export;
pub mod flatten;
pub mod highlight;
pub mod navigator;
pub mod search;
pub mod session;

#[cfg(test)]
pub(crate) mod fixtures;
