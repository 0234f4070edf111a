//! Integration with third-party crates.

#[cfg(feature = "serde")]
mod de;
