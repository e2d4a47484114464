pub mod book_manager;
pub mod services;
pub mod validation;

pub use book_manager::BookManager;
