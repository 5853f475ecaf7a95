//! Completion engine for the Ansible playbook language.
//!
//! Given a document and a cursor position, the engine determines what kind
//! of token is expected there — a play/role/block/task keyword, a module
//! name (fully-qualified or short), a module option or sub-option, or an
//! option's value — and returns an ordered, deduplicated, context-filtered
//! candidate list. The hosting language server owns the transport; this
//! crate exposes the one entry point a completion handler needs:
//! [`completion::provide_completion`].

pub mod catalog;
pub mod completion;
pub mod document;
pub mod logging;
pub mod settings;
pub mod workspace;
pub mod yaml;

pub use completion::provide_completion;
pub use document::Document;
pub use settings::DocumentSettings;
pub use workspace::WorkspaceContext;
