mod api;
mod error;
mod notes;
mod store;
pub mod token;

pub use api::ApiClient;
pub use error::ClientError;
pub use notes::NoteList;
pub use store::NoteStore;
pub use token::{FileTokenStore, StaticToken, TokenError, TokenSource};
