//! Embassy tasks.  Each one is a thin async loop around a host-tested
//! state machine from the library crate.

pub mod auth;
pub mod button;
pub mod display;
pub mod feedback;
pub mod input;
pub mod shuffler;
