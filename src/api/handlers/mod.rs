pub mod health;
pub mod post;
pub mod recipe;
pub mod socket;
pub mod user;
