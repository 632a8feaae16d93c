mod core;
mod view_state;

pub use self::core::*;
pub use view_state::*;
