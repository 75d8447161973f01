pub mod resolv_conf;

pub use resolv_conf::{ResolvConf, DEFAULT_RESOLV_CONF_PATH};
