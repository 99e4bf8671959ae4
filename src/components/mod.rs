//! UI Components for RIP MIND.

mod letter_list;
mod nav_menu;

pub use letter_list::{LetterDetailModal, LetterListView};
pub use nav_menu::NavMenu;
