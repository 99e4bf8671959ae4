//! Visual theme for RIP MIND.

mod styles;

pub use styles::GLOBAL_STYLES;
