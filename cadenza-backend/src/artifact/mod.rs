mod lock;
pub mod name;
mod path;
pub mod stage;

pub use lock::Locks;
pub use name::Derived;
pub use path::Path;
