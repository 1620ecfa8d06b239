pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Board construction rejected because a dimension was zero.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid board dimensions: {rows} rows x {cols} cols")]
pub struct InvalidDimensions {
    pub rows: usize,
    pub cols: usize,
}
