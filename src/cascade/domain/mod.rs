//! Domain model for deletion roots, closures, and audit results.

mod closure;
mod result;
mod root;

pub use closure::DeletionClosure;
pub use result::CascadeResult;
pub use root::DeletionRoot;
