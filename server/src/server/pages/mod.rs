//! Server-rendered HTML for the generator and history screens.

pub mod generator;
pub mod history;

use label_engine::LabelRequest;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Which screen to render. Owned by the request; there is no session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Main,
    History,
}

impl Page {
    /// Parse the `page` query value; anything unrecognised selects `Main`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("history") => Self::History,
            _ => Self::Main,
        }
    }
}

/// Outcome message shown above a page after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    /// Rebuild a flash from the `notice`/`error` query values of a redirect.
    pub fn from_query(notice: Option<String>, error: Option<String>) -> Option<Self> {
        error.map(Flash::Error).or(notice.map(Flash::Success))
    }

    fn render(&self) -> String {
        let (class, msg) = match self {
            Flash::Success(m) => ("flash success", m),
            Flash::Error(m) => ("flash error", m),
        };
        format!(r#"<div class="{class}">{}</div>"#, escape(msg))
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode a label file name for use in a URL path or query.
pub fn url_component(s: &str) -> String {
    utf8_percent_encode(s, URL_SAFE).to_string()
}

/// URL serving a saved label image.
pub fn label_url(name: &str) -> String {
    format!("/labels/{}", url_component(name))
}

/// Where `POST /generate` sends the browser: the generator screen showing
/// `name`, with the submitted values kept in the form.
pub fn generated_location(name: &str, request: &LabelRequest) -> String {
    let fields = [
        ("part_name", &request.part_name),
        ("part_no", &request.part_no),
        ("total_quantity", &request.total_quantity),
        ("qty_per_pkt", &request.qty_per_pkt),
        ("invoice_no", &request.invoice_no),
        ("batch_no", &request.batch_no),
    ];
    let mut location = format!("/?page=main&generated={}", url_component(name));
    for (key, value) in fields {
        location.push_str(&format!("&{key}={}", url_component(value)));
    }
    location
}

/// Where a delete sends the browser: the history screen with its outcome.
pub fn history_location(flash: &Flash) -> String {
    let (key, msg) = match flash {
        Flash::Success(m) => ("notice", m),
        Flash::Error(m) => ("error", m),
    };
    format!("/?page=history&{key}={}", url_component(msg))
}

/// Wrap page content with the shared document shell and sidebar.
fn layout(title: &str, sidebar: &str, flash: Option<&Flash>, content: &str) -> String {
    let flash = flash.map(Flash::render).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/assets/style.css">
</head>
<body>
<nav class="sidebar">{sidebar}</nav>
<main>
<h1>{title}</h1>
{flash}
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Standalone error page.
pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        r#"<a class="button" href="/?page=main">Back to Generator</a>"#,
        Some(&Flash::Error(message.to_string())),
        "",
    )
}
