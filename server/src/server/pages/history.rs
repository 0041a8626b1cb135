//! History browser screen.

use crate::services::history::HistoryDay;

use super::{Flash, escape, label_url, layout, url_component};

const SIDEBAR: &str = r#"<a class="button" href="/?page=main">Back to Generator</a>"#;

/// Render grouped labels. `viewing` re-displays one entry with a caption.
pub fn render(days: &[HistoryDay], viewing: Option<&str>, flash: Option<&Flash>) -> String {
    if days.is_empty() {
        return layout(
            "QR Code History",
            SIDEBAR,
            flash,
            r#"<p class="empty">No QR codes generated yet.</p>"#,
        );
    }

    let mut content = String::new();
    for day in days {
        content.push_str(&format!(
            r#"<section class="day"><h2>{}</h2>"#,
            escape(&day.date_label)
        ));
        for entry in &day.entries {
            let name = escape(&entry.name);
            let url = label_url(&entry.name);
            let anchor = url_component(&entry.name);
            let note = entry
                .source
                .note()
                .map(|n| format!(" ({n})"))
                .unwrap_or_default();
            content.push_str(&format!(
                r#"<article class="entry" id="{anchor}">
<h3>Generated at {time}{note}</h3>
<img src="{url}" alt="{name}">
<div class="actions">
<a class="button" href="/?page=history&amp;view={anchor}#{anchor}">View {name}</a>
<form method="post" action="{url}/delete"><button type="submit" class="danger">Delete {name}</button></form>
</div>"#,
                time = escape(&entry.time_label),
            ));
            if viewing == Some(entry.name.as_str()) {
                content.push_str(&format!(
                    r#"<figure class="viewing"><img src="{url}" alt="{name}"><figcaption>Viewing: {name}</figcaption></figure>"#
                ));
            }
            content.push_str("</article>");
        }
        content.push_str("</section>");
    }

    layout("QR Code History", SIDEBAR, flash, &content)
}
