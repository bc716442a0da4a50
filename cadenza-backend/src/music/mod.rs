pub mod key;
pub mod tempo;

pub use key::{Key, Mode};
