pub mod store;

pub use store::{MediaStore, StoredMedia};
