//! Shared protocol, data model and pure layout logic for the letterwheel
//! client.

pub mod error;
pub mod layout;
pub mod locale;
pub mod models;
pub mod protocol;
pub mod timer;

pub use error::*;
pub use layout::*;
pub use locale::*;
pub use models::*;
pub use protocol::*;
pub use timer::*;
