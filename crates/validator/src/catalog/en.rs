//! English message pack.

use super::{MessageCatalog, list, num, pair, text};

/// Builds the English catalog.
#[must_use]
pub fn catalog() -> MessageCatalog {
    let mut m = MessageCatalog::new();

    m.insert("string", "Must be a text value");
    m.insert_fmt("min", |arg| {
        format!("Must be at least {} characters", num(arg))
    });
    m.insert_fmt("max", |arg| {
        format!("Must be at most {} characters", num(arg))
    });
    m.insert_fmt("between", |arg| {
        let (lo, hi) = pair(arg);
        format!("Must be between {lo} and {hi} characters")
    });
    m.insert("number", "Must be a number");
    m.insert("email", "Must be a valid email address");
    m.insert("url", "Must be a valid URL");
    m.insert("phone", "Must be a valid phone number");
    m.insert("required", "This field is required");
    m.insert("image", "Must be an image");
    m.insert("regex", "Invalid format");
    m.insert_fmt("size", |arg| {
        format!("File must be at most {} KB", num(arg))
    });
    m.insert_fmt("confirmed", |arg| {
        format!("Must match the {} field", text(arg))
    });
    m.insert_fmt("one_of", |arg| format!("Must be one of: {}", list(arg)));
    m.insert_fmt("not_one_of", |arg| {
        format!("Must not be one of: {}", list(arg))
    });
    m.insert_fmt("ext", |arg| {
        format!("File extension must be one of: {}", list(arg))
    });
    m.insert("integer", "Must be an integer");
    m.insert_fmt("is", |arg| format!("Must be {}", text(arg)));
    m.insert_fmt("is_not", |arg| format!("Must not be {}", text(arg)));
    m.insert_fmt("length", |arg| {
        format!("Must be exactly {} characters", num(arg))
    });
    m.insert_fmt("max_value", |arg| format!("Must be at most {}", num(arg)));
    m.insert_fmt("min_value", |arg| format!("Must be at least {}", num(arg)));
    m.insert_fmt("between_values", |arg| {
        let (lo, hi) = pair(arg);
        format!("Must be between {lo} and {hi}")
    });
    m.insert_fmt("mimes", |arg| {
        format!("File type must be one of: {}", list(arg))
    });
    m.insert("unique_username", "This username is already taken");
    m.insert("validation_error", "An error occurred during validation.");

    m
}
