//! Codecs composed from the compact integer encoding.

pub mod bytestring;
pub mod fixed;
pub mod vector;
