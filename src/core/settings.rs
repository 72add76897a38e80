//! Process-visible level and color flags.
//!
//! Each flag is an independent atomic accessed with relaxed ordering. Readers
//! may observe a slightly stale value; nothing correctness-critical branches on
//! these flags, so no cross-field consistency is provided.

use super::log_level::LogLevel;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

#[derive(Debug)]
pub struct LoggerSettings {
    level: AtomicU8,
    colored: AtomicBool,
}

impl LoggerSettings {
    pub const fn new(level: LogLevel, colored: bool) -> Self {
        Self {
            level: AtomicU8::new(level.as_u8()),
            colored: AtomicBool::new(colored),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    #[inline]
    pub fn colored(&self) -> bool {
        self.colored.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_colored(&self, colored: bool) {
        self.colored.store(colored, Ordering::Relaxed);
    }
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self::new(LogLevel::Info, true)
    }
}
