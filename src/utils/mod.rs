pub mod format;

pub use format::{
    format_bytes, format_confidence, generate_id, is_valid_email, is_valid_phone, truncate_text,
};
