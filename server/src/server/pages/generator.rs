//! Label generator screen.

use label_engine::LabelRequest;

use super::{Flash, escape, label_url, layout};

const SIDEBAR: &str = r#"<a class="button" href="/?page=history">View QR Code History</a>"#;

/// Render the generator form pre-filled with `request`, plus the preview and
/// download link of `generated` when a label was just saved.
pub fn render(request: &LabelRequest, generated: Option<&str>, flash: Option<&Flash>) -> String {
    let fields = [
        ("part_name", "PART NAME", &request.part_name),
        ("part_no", "PART NO", &request.part_no),
        ("total_quantity", "TOTAL QUANTITY", &request.total_quantity),
        ("qty_per_pkt", "QTY. PER PKT", &request.qty_per_pkt),
        ("invoice_no", "INVOICE NO", &request.invoice_no),
        ("batch_no", "BATCH NO", &request.batch_no),
    ];

    let mut content = String::from(r#"<form method="post" action="/generate" class="label-form">"#);
    for (name, label, value) in fields {
        content.push_str(&format!(
            r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{}">"#,
            escape(value)
        ));
    }
    content.push_str(r#"<button type="submit">Generate QR Code</button></form>"#);

    if let Some(name) = generated {
        let url = label_url(name);
        content.push_str(&format!(
            r#"<figure class="preview"><img src="{url}" alt="{alt}"></figure>
<a class="button" href="{url}?download=true" download="{alt}">Download Image</a>"#,
            alt = escape(name),
        ));
    }

    layout("QR Code Generator", SIDEBAR, flash, &content)
}
