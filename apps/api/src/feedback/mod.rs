// Free-text feedback and thumbnail requests, relayed to the chat webhook.
// Delivery is best effort and at most once: nothing is stored, nothing is retried.

pub mod handlers;
pub mod message;
pub mod notifier;
