pub mod buffer;
pub mod field;

pub use buffer::InputBuffer;
pub use field::{FieldFocus, TextField};
