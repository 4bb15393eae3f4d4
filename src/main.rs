#[tokio::main]
async fn main() {
    if let Err(e) = recipe_backend::run().await {
        eprintln!("recipe-backend failed: {}", e);
        std::process::exit(1);
    }
}
