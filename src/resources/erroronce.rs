//! Report-once registry for configuration problems.
//!
//! A misconfigured definition is hit every tick by every entity using it.
//! [`ErrorOnce`] remembers which keys were already reported so the log gets a
//! single line per problem.

use bevy_ecs::prelude::Resource;
use log::error;
use rustc_hash::FxHashSet;

#[derive(Resource, Debug, Default)]
pub struct ErrorOnce {
    reported: FxHashSet<String>,
}

impl ErrorOnce {
    /// Log `message` unless `key` was already reported.
    ///
    /// Returns true when the message was logged by this call.
    pub fn error_once(&mut self, key: &str, message: impl std::fmt::Display) -> bool {
        if self.reported.contains(key) {
            return false;
        }
        error!("{}", message);
        self.reported.insert(key.to_string());
        true
    }

    pub fn was_reported(&self, key: &str) -> bool {
        self.reported.contains(key)
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_key_once() {
        let mut once = ErrorOnce::default();
        assert!(once.error_once("a", "first"));
        assert!(!once.error_once("a", "again"));
        assert!(once.error_once("b", "other"));
        assert_eq!(once.len(), 2);
        assert!(once.was_reported("a"));
    }
}
