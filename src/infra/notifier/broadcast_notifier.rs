use crate::domain::{models::recipe::NewRecipeEvent, ports::RecipeNotifier};
use tokio::sync::broadcast;
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out of recipe events. A subscriber that falls more than
/// `capacity` events behind skips ahead instead of holding up publishers.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<NewRecipeEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RecipeNotifier for BroadcastNotifier {
    fn publish(&self, event: NewRecipeEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!("Published new-recipe event to {} subscribers", receivers),
            Err(_) => debug!("No subscribers for new-recipe event"),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<NewRecipeEvent> {
        self.sender.subscribe()
    }
}
