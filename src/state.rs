use std::sync::Arc;
use crate::domain::ports::{PostRepository, RecipeNotifier, RecipeRepository, UserRepository};
use crate::domain::services::{
    auth_service::AuthService, post_service::PostService,
    recipe_service::RecipeService, user_service::UserService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub recipe_repo: Arc<dyn RecipeRepository>,
    pub post_repo: Arc<dyn PostRepository>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub recipe_service: Arc<RecipeService>,
    pub post_service: Arc<PostService>,
    pub notifier: Arc<dyn RecipeNotifier>,
}

impl AppState {
    /// Wires the services on top of an already-connected set of repositories.
    pub fn new(
        config: Config,
        user_repo: Arc<dyn UserRepository>,
        recipe_repo: Arc<dyn RecipeRepository>,
        post_repo: Arc<dyn PostRepository>,
        notifier: Arc<dyn RecipeNotifier>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(&config));
        let user_service = Arc::new(UserService::new(user_repo.clone(), auth_service.clone()));
        let recipe_service = Arc::new(RecipeService::new(recipe_repo.clone(), user_repo.clone()));
        let post_service = Arc::new(PostService::new(post_repo.clone(), user_repo.clone()));

        Self {
            config,
            user_repo,
            recipe_repo,
            post_repo,
            auth_service,
            user_service,
            recipe_service,
            post_service,
            notifier,
        }
    }
}
