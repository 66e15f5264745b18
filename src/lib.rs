pub mod config;
pub mod core;
pub mod error;
pub mod registry;

pub use crate::core::alphabet::Alphabet;
pub use crate::core::locale::{format_locale, WILDCARD_LOCALE};
pub use crate::error::{AlphonicError, Result};
pub use crate::registry::Alphonic;
