pub mod count;
pub mod note;
pub mod replay;
