//! Label fields and the QR payload built from them.

use serde::Deserialize;

/// Company header printed at the top of every label and first line of the payload.
pub const HEADER: &str = "KAPILA INDUSTRIES, FBD";

/// The six free-text fields entered for one label.
///
/// Fields missing from a submitted form take the same defaults the
/// generator form is pre-filled with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LabelRequest {
    pub part_name: String,
    pub part_no: String,
    pub total_quantity: String,
    pub qty_per_pkt: String,
    pub invoice_no: String,
    pub batch_no: String,
}

impl Default for LabelRequest {
    fn default() -> Self {
        Self {
            part_name: "03-003-YSD-001-B:MAIN HOUSING".into(),
            part_no: "BOC000012090".into(),
            total_quantity: "600.00".into(),
            qty_per_pkt: "25".into(),
            invoice_no: "26.08.24/4761".into(),
            batch_no: "250824B17SRV-01".into(),
        }
    }
}

impl LabelRequest {
    /// Detail lines in print order, each with its label prefix.
    pub fn detail_lines(&self) -> [String; 6] {
        [
            format!("PART NAME: {}", self.part_name),
            format!("PART NO: {}", self.part_no),
            format!("TOTAL QUANTITY: {}", self.total_quantity),
            format!("QTY. PER PKT: {}", self.qty_per_pkt),
            format!("INVOICE NO: {}", self.invoice_no),
            format!("BATCH NO: {}", self.batch_no),
        ]
    }

    /// The exact text encoded into the QR symbol: header plus detail lines,
    /// newline-joined, no trailing newline.
    pub fn qr_payload(&self) -> String {
        let mut payload = String::from(HEADER);
        for line in self.detail_lines() {
            payload.push('\n');
            payload.push_str(&line);
        }
        payload
    }
}
