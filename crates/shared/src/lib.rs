pub mod geo;
pub mod models;
pub mod score;
pub mod search;
