pub mod change_bpm;
pub mod change_key;
pub mod common;
pub mod constant;
pub mod get_lyrics;
pub mod get_song;
pub mod insert;
pub mod reset;
