mod avatar;

pub use avatar::{Avatar, Intent};
