//! Page components for RIP MIND.

mod letter;

pub use letter::LetterPage;
