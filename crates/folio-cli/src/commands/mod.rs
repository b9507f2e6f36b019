pub mod dispatch;
pub mod entry;
pub mod export;
pub mod extract;
pub mod index;
pub mod story;
