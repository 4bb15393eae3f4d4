pub mod auth;
pub mod content;
pub mod listing;
pub mod post;
pub mod recipe;
pub mod user;
