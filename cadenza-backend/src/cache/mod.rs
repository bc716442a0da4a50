mod decode;

pub use decode::Decode;
