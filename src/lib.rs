pub mod app;
pub mod clipboard;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod fzf;
pub mod model;
pub mod passwork;

pub use app::{run, Outcome};
pub use clipboard::{Clipboard, ClipboardCommand};
pub use config::Config;
pub use error::{ApiFailure, Error, Result};
pub use fzf::{Fzf, Selector};
pub use model::passwork::{CustomField, PasswordDetail, PathSegment, SearchHit};
pub use passwork::{PassworkClient, Session, Vault};
