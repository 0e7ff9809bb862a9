pub mod audio_cache;

pub use audio_cache::{AudioCache, CachedAudio};
