pub mod credentials;
pub mod document;
pub mod item;
pub mod price;
