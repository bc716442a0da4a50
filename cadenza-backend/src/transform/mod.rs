pub mod key;
pub mod tempo;

pub use key::{apply_key_shift, change_key};
pub use tempo::{apply_tempo_shift, change_bpm};
