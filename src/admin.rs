//! Admin panel backend: the hardcoded login check and the persisted
//! upload store that mirrors uploads into the browse list.

mod auth;
mod store;

pub use auth::verify;
pub use store::{UploadRecord, UploadStore, default_data_dir};
