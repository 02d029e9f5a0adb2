//! Request authentication

pub mod extension_key;

pub use extension_key::{EXTENSION_KEY_HEADER, require_extension_key};
