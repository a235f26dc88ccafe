// src/message.rs
//! Renders the outgoing digest and alert texts. The layout is byte-stable:
//! the dedupe fingerprint is computed over these strings, so identical
//! input must produce identical output.

use crate::news::NewsItem;

const DIGEST_HEADER: &str = "📰 Noticias de Fortnite";
const DIGEST_FOOTER: &str = "Más info: https://dash.fortnite-api.com/endpoints/news";
const ALERT_HEADER: &str = "⚠️ Posible evento especial detectado";
const ALERT_NOTE: &str = "(Detectado por palabras clave configurables)";
const FALLBACK_TITLE: &str = "Novedad";

const DIGEST_ITEM_LIMIT: usize = 3;
const ALERT_ITEM_LIMIT: usize = 2;

/// Periodic news digest: header, optional date line, top items, fixed footer.
pub fn digest(items: &[NewsItem], date: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(DIGEST_HEADER);
    out.push('\n');
    if let Some(date) = date {
        out.push_str("Fecha: ");
        out.push_str(date);
        out.push('\n');
    }
    out.push('\n');
    push_items(&mut out, items, DIGEST_ITEM_LIMIT);
    out.push_str(DIGEST_FOOTER);
    out.trim().to_string()
}

/// Keyword-triggered alert: different header, tighter item cap, no date.
pub fn alert(items: &[NewsItem]) -> String {
    let mut out = String::new();
    out.push_str(ALERT_HEADER);
    out.push_str("\n\n");
    push_items(&mut out, items, ALERT_ITEM_LIMIT);
    out.push_str(ALERT_NOTE);
    out.trim().to_string()
}

fn push_items(out: &mut String, items: &[NewsItem], limit: usize) {
    for item in items.iter().take(limit) {
        out.push_str("- ");
        out.push_str(item.headline().unwrap_or(FALLBACK_TITLE));
        out.push('\n');
        if let Some(body) = item.body_text() {
            out.push_str(body);
            out.push('\n');
        }
        out.push('\n');
    }
}
