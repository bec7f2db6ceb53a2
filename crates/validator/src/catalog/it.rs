//! Italian message pack.

use super::{MessageCatalog, list, num, pair, text};

/// Builds the Italian catalog.
#[must_use]
pub fn catalog() -> MessageCatalog {
    let mut m = MessageCatalog::new();

    m.insert("string", "Il valore deve essere un testo");
    m.insert_fmt("min", |arg| {
        format!("Inserisci almeno {} caratteri", num(arg))
    });
    m.insert_fmt("max", |arg| {
        format!("Inserisci al massimo {} caratteri", num(arg))
    });
    m.insert_fmt("between", |arg| {
        let (lo, hi) = pair(arg);
        format!("La lunghezza deve essere compresa tra {lo} e {hi} caratteri")
    });
    m.insert("number", "Il valore deve essere un numero");
    m.insert("email", "Inserisci un indirizzo email valido");
    m.insert("url", "Inserisci un URL valido");
    m.insert("phone", "Inserisci un numero di telefono valido");
    m.insert("required", "Campo obbligatorio");
    m.insert("image", "Il file deve essere un'immagine");
    m.insert("regex", "Formato non valido");
    m.insert_fmt("size", |arg| {
        format!("Il file non deve superare {} KB", num(arg))
    });
    m.insert_fmt("confirmed", |arg| {
        format!("Il valore non corrisponde al campo {}", text(arg))
    });
    m.insert_fmt("one_of", |arg| {
        format!("Il valore deve essere uno tra: {}", list(arg))
    });
    m.insert_fmt("not_one_of", |arg| {
        format!("Il valore non può essere uno tra: {}", list(arg))
    });
    m.insert_fmt("ext", |arg| {
        format!("L'estensione del file deve essere una tra: {}", list(arg))
    });
    m.insert("integer", "Il valore deve essere un numero intero");
    m.insert_fmt("is", |arg| format!("Il valore deve essere {}", text(arg)));
    m.insert_fmt("is_not", |arg| {
        format!("Il valore non può essere {}", text(arg))
    });
    m.insert_fmt("length", |arg| {
        format!("La lunghezza deve essere esattamente di {} caratteri", num(arg))
    });
    m.insert_fmt("max_value", |arg| {
        format!("Il valore deve essere al massimo {}", num(arg))
    });
    m.insert_fmt("min_value", |arg| {
        format!("Il valore deve essere almeno {}", num(arg))
    });
    m.insert_fmt("between_values", |arg| {
        let (lo, hi) = pair(arg);
        format!("Il valore deve essere compreso tra {lo} e {hi}")
    });
    m.insert_fmt("mimes", |arg| {
        format!("Il tipo di file deve essere uno tra: {}", list(arg))
    });
    m.insert("unique_username", "Questo nome utente è già in uso");
    m.insert("validation_error", "Si è verificato un errore durante la validazione.");

    m
}
