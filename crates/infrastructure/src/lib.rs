pub mod dns;
pub mod logging;
pub mod system;
