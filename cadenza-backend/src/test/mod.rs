mod mock_impl;

pub use capability::{Calls, Fake};
pub use mock_impl::{Mock, mock};
