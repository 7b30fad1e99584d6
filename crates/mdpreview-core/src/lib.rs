//! mdpreview Core
//!
//! This crate provides the shared types and error definitions
//! for the mdpreview markdown renderer.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`StageKind`] - Names for every step of the rendering pipeline
//! - [`MdPreviewError`] - Error types

pub mod enums;
pub mod error;

pub use enums::StageKind;
pub use error::{MdPreviewError, Result};
