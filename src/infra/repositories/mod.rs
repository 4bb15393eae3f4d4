pub mod sqlite_post_repo;
pub mod sqlite_recipe_repo;
pub mod sqlite_user_repo;

pub mod postgres_post_repo;
pub mod postgres_recipe_repo;
pub mod postgres_user_repo;
