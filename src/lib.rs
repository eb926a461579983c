//! compcensus - Component usage census for design document snapshots
//!
//! Walks a scoped subtree of a design document, counts how often each
//! reusable component is instantiated, and maps which components embed
//! instances of which others. Read-only: the only document state it
//! touches is the user's focus (selection, current page, viewport).

pub mod cli;
pub mod document;
pub mod report;
pub mod scan;
pub mod session;
pub mod settings;
