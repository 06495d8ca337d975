//! Annotation session module
//!
//! This module contains:
//! - Session state and its upload/render/download/clear transitions
//! - The coordinate form and live preview
//! - Message types and handlers

pub mod form;
pub mod handlers;
pub mod messages;
pub mod preview;
pub mod state;

pub use messages::{Msg, Reply};
pub use state::{RenderStep, Session};
