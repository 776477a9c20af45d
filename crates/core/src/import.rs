//! Domain types and CSV decoding for the bulk device-identity import.
//!
//! The reconciliation loop itself lives in the API crate (it needs the
//! database); this module owns everything that can be expressed without
//! I/O: the raw-row shape, per-row outcome classification, the aggregate
//! outcome report, and the decoder that turns an uploaded CSV body into
//! an ordered sequence of raw rows.

use serde::Serialize;

/// A single decoded row from an uploaded file, fields still untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Raw IMEI field, not yet validated.
    pub imei: String,
    /// Raw product id field, not yet resolved.
    pub product_id: String,
    /// Raw registration flag, if the column was present and non-empty.
    pub is_registered: Option<String>,
}

/// Classification of one processed row. Every input row ends up in
/// exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Device identity committed, stock incremented.
    Success,
    /// IMEI already present; counted but not reported as an error.
    Duplicate,
    /// Row rejected; carries the operator-facing message.
    Failed(String),
}

/// Aggregate report for one batch-import invocation. Ephemeral: returned
/// to the caller, never persisted.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ImportOutcome {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub duplicates: usize,
    /// Failure messages in input order. Duplicates contribute nothing.
    pub errors: Vec<String>,
}

impl ImportOutcome {
    /// Fold one row classification into the report.
    pub fn record(&mut self, outcome: RowOutcome) {
        self.total += 1;
        match outcome {
            RowOutcome::Success => self.success += 1,
            RowOutcome::Duplicate => self.duplicates += 1,
            RowOutcome::Failed(message) => {
                self.failed += 1;
                self.errors.push(message);
            }
        }
    }
}

/// A file-level decode failure. Fatal for the whole batch: no per-row
/// processing happens when decoding fails.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("CSV file is empty")]
    Empty,

    #[error("CSV file contains a header but no data rows")]
    NoDataRows,

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Positions of the recognised columns within the header row.
struct ColumnMap {
    imei: usize,
    product_id: usize,
    is_registered: Option<usize>,
}

/// Decode an uploaded CSV body into an ordered sequence of [`RawRow`]s.
///
/// Header matching is case-insensitive and whitespace-trimmed; both
/// `product_id` and `productid` spellings are accepted (same for the
/// optional `is_registered` column). Blank lines are skipped. Rows
/// shorter than the header are padded with empty fields so that a
/// missing trailing flag decodes as "absent" rather than failing.
pub fn decode_csv(body: &str) -> Result<Vec<RawRow>, DecodeError> {
    let mut lines = body.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().ok_or(DecodeError::Empty)?;
    let columns = map_columns(header)?;

    let rows: Vec<RawRow> = lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let field = |idx: usize| fields.get(idx).copied().unwrap_or("");

            let is_registered = columns
                .is_registered
                .map(field)
                .filter(|v| !v.is_empty())
                .map(String::from);

            RawRow {
                imei: field(columns.imei).to_string(),
                product_id: field(columns.product_id).to_string(),
                is_registered,
            }
        })
        .collect();

    if rows.is_empty() {
        return Err(DecodeError::NoDataRows);
    }
    Ok(rows)
}

/// Resolve header names to column indices.
fn map_columns(header: &str) -> Result<ColumnMap, DecodeError> {
    let names: Vec<String> = header
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let position = |candidates: &[&str]| {
        names
            .iter()
            .position(|name| candidates.contains(&name.as_str()))
    };

    let imei = position(&["imei"]).ok_or(DecodeError::MissingColumn("imei"))?;
    let product_id = position(&["product_id", "productid"])
        .ok_or(DecodeError::MissingColumn("product_id"))?;
    let is_registered = position(&["is_registered", "isregistered"]);

    Ok(ColumnMap {
        imei,
        product_id,
        is_registered,
    })
}

// ── Tests ────────────────────────────────────────────────────────────
