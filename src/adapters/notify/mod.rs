mod sound;
mod webhook;

pub use sound::{Cue, SoundNotifier};
pub use webhook::WebhookNotifier;
