//! Transport-agnostic request handlers speaking the wire shapes of `cadenza_api`.

pub mod change_bpm;
pub mod change_key;
pub mod get_lyrics;
pub mod get_song;
pub mod insert;
pub mod reset;
