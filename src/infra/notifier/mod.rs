pub mod broadcast_notifier;
