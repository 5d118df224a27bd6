pub mod period;
pub mod serde_formats;
