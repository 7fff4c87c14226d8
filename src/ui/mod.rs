//! UI adapters: document rendering, user feedback and the sidebar shell.

pub mod document;
pub mod feedback;
pub mod sidebar;

pub use document::{Document, Element, MemoryDocument, NodeId, NodeKind};
pub use feedback::{Feedback, Severity, Toast, DEFAULT_MESSAGE_DURATION};
