//! RIP MIND Core Library
//!
//! The letter flow of the RIP MIND site: write a short letter, optionally
//! leave a phone number, then send it live or bury it in the archive.
//!
//! ## Overview
//!
//! - [`LetterStore`]: the archive, one JSON list in a redb slot
//! - [`StepNavigator`]: exactly one visible [`Step`] at a time
//! - [`LetterFlow`]: draft, consent, validation and submission
//! - [`LetterList`]: newest-first archive rows with selection and detail
//! - [`Notifier`]: where live letters are forwarded
//!
//! ## Quick Start
//!
//! ```ignore
//! use ripmind_core::{Destination, FlowConfig, LetterFlow, LetterStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = LetterStore::open("~/.ripmind/ripmind.redb")?;
//!     let mut flow = LetterFlow::new(store, FlowConfig::default());
//!
//!     flow.start();
//!     flow.set_consent(false);
//!     flow.draft_mut().set_nickname("Sam");
//!     flow.validate_before_content()?;
//!     flow.draft_mut().set_content("hello");
//!     flow.finish_content();
//!
//!     flow.submit_and_wait(Destination::Archive).await;
//!     for row in flow.list().rows() {
//!         println!("{:?}", row);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod list;
pub mod notify;
pub mod step;
pub mod store;
pub mod types;

// Re-exports
pub use config::{FlowConfig, LiveMode};
pub use error::{LetterError, LetterResult, NotifyError, ValidationError};
pub use flow::{Clock, EntryPoint, LetterFlow, PendingStep, Submission, SystemClock};
pub use list::{LetterDetail, LetterList, ListRow};
pub use notify::{HttpNotifier, NoopNotifier, Notifier, NotifyRequest};
pub use step::{Step, StepNavigator};
pub use store::{LetterStore, Storage};
pub use types::*;
