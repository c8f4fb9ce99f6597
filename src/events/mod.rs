//! Event and message types.
//!
//! Submodules:
//! - [`audio`] – commands and acknowledgements for the background audio thread
//! - [`refresh`] – display invalidation of an animated entity
pub mod audio;
pub mod refresh;
