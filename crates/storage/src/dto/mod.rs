pub mod competition;
pub mod user;
pub mod weight;
