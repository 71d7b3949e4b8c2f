pub mod project;
pub mod vote;
