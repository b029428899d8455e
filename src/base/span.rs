//! Source text positions and ranges.

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;
