pub mod health_check;
pub mod send_email;

pub use health_check::*;
pub use send_email::*;
