//! Tracing/logging setup shared by storefront binaries.

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::Format::Json);
}

/// Initialize process-wide tracing with human-readable output.
pub fn init_pretty() {
    tracing::init(tracing::Format::Pretty);
}

/// Tracing configuration (filters, output format).
pub mod tracing;
