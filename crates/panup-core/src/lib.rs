pub mod baidupcs;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod manifest;
pub mod pcs;
pub mod platform;
pub mod release;
pub mod session;
pub mod target;
pub mod utils;

pub use error::{Error, Result};
pub use pcs::{Credentials, PcsRunner};
pub use platform::{Arch, Os, Platform};
