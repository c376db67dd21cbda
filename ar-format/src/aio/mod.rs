//! Async (tokio) frontend for draining archives.

#[cfg(feature = "writer")]
mod writer;
