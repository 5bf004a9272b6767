//! Expression builders for the page operations. Every operation runs as one
//! `Runtime.evaluate` round trip; live element references are parked in a
//! per-page handle array so the accessor's opaque ids survive between calls.
//!
//! Handle-addressed expressions answer with a `{ stale, value }` envelope
//! instead of bare null, which does not survive the by-value protocol round
//! trip unambiguously.

/// Shared prelude binding the handle registry.
const PRELUDE: &str = "const reg = window.__harvestHandles = window.__harvestHandles || [];";

/// JSON-quote a string for embedding into an expression.
pub(crate) fn quoted(raw: &str) -> String {
    serde_json::to_string(raw).unwrap_or_else(|_| "\"\"".to_string())
}

pub(crate) fn query(selector: &str) -> String {
    format!(
        "(() => {{ {PRELUDE} \
         return Array.from(document.querySelectorAll({sel})).map((el) => reg.push(el) - 1); }})()",
        sel = quoted(selector)
    )
}

pub(crate) fn query_within(root: u64, selector: &str) -> String {
    format!(
        "(() => {{ {PRELUDE} const root = reg[{root}]; \
         if (!root) return {{ stale: true, value: null }}; \
         return {{ stale: false, value: \
         Array.from(root.querySelectorAll({sel})).map((el) => reg.push(el) - 1) }}; }})()",
        sel = quoted(selector)
    )
}

pub(crate) fn inner_text(handle: u64) -> String {
    format!(
        "(() => {{ {PRELUDE} const el = reg[{handle}]; \
         if (!el) return {{ stale: true, value: null }}; \
         return {{ stale: false, value: el.innerText }}; }})()"
    )
}

pub(crate) fn attribute(handle: u64, name: &str) -> String {
    format!(
        "(() => {{ {PRELUDE} const el = reg[{handle}]; \
         if (!el) return {{ stale: true, value: null }}; \
         return {{ stale: false, value: el.getAttribute({name}) }}; }})()",
        name = quoted(name)
    )
}

pub(crate) fn closest(handle: u64, selector: &str) -> String {
    format!(
        "(() => {{ {PRELUDE} const el = reg[{handle}]; \
         if (!el) return {{ stale: true, value: null }}; \
         const hit = el.closest({sel}); \
         return {{ stale: false, value: hit ? reg.push(hit) - 1 : null }}; }})()",
        sel = quoted(selector)
    )
}

pub(crate) fn is_visible(handle: u64) -> String {
    format!(
        "(() => {{ {PRELUDE} const el = reg[{handle}]; \
         if (!el) return {{ stale: true, value: null }}; \
         return {{ stale: false, value: el.offsetParent !== null }}; }})()"
    )
}

pub(crate) fn click(handle: u64) -> String {
    format!(
        "(() => {{ {PRELUDE} const el = reg[{handle}]; \
         if (!el) return false; el.click(); return true; }})()"
    )
}

pub(crate) fn scroll_to_bottom() -> String {
    "(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()".to_string()
}

pub(crate) fn content_height() -> String {
    "document.body.scrollHeight".to_string()
}
