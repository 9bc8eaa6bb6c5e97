//! Command implementations for the Quill CLI
//!
//! Each command module handles the CLI interface and delegates to
//! quill-template for the actual rendering.

pub mod render;
