//! Rule books shipped with the runtime.

pub mod bard;

pub use bard::Bard;
