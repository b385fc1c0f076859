//! Thread (session) domain.
//!
//! - [`entities::Session`]: one brain dump plus its answer history
//! - [`entities::Answer`]: a single accepted answer

pub mod entities;

/// Default upper bound on stored threads; older ones are evicted
pub const SESSION_CAPACITY: usize = 50;
