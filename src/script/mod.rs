pub mod cursor;
pub mod pushdrop;

pub use cursor::{compact_size, write_compact_size, Cursor, WireError};
pub use pushdrop::{PushDropToken, TokenDecodeError, LOCK_KEY_LEN};
