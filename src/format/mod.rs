//! Decoding stages for the `.datx` / `.dat` accelerometer log format.
//!
//! Each stage is a plain function over in-memory data, run in this order by
//! [`crate::decoder::Decoder`]:
//!
//! ```text
//! source ─► header ─┐
//!        └► tail ───┴► body (+ decompress, expand) ─► clean ─► reconcile ─► units
//! ```
pub mod body;
pub mod clean;
pub mod decompress;
pub mod expand;
pub mod header;
pub mod reconcile;
pub mod source;
pub mod tail;
pub mod units;

pub use body::{CompressionScheme, RawSample};
pub use header::{FirmwareId, HeaderInfo};
pub use reconcile::{ExactLengthPolicy, Reconciliation};
pub use source::FileFormat;
pub use units::Units;
