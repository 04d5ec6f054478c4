use log::{debug, info};
use std::fmt;

pub mod wheel;

/// Default spin parameters
pub mod defaults {
    /// Full rotations added to every spin, lower bound.
    pub const MIN_SPINS: f64 = 5.0;
    /// Full rotations added to every spin, upper bound (exclusive).
    pub const MAX_SPINS: f64 = 8.0;
    /// Spin animation duration bounds in seconds.
    pub const MIN_SPIN_SECS: f64 = 5.0;
    pub const MAX_SPIN_SECS: f64 = 7.0;
}

/// Header column holding the entry id, shared by both file kinds.
pub const ID_COLUMN: &str = "ID";
/// Optional header column holding an image reference.
pub const IMAGE_COLUMN: &str = "ImageURL";

/// Which of the two uploaded lists a CSV belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntryKind {
    Participants,
    Prizes,
}

impl EntryKind {
    /// Header column holding the display name for this kind of file.
    pub fn name_column(self) -> &'static str {
        match self {
            EntryKind::Participants => "Name",
            EntryKind::Prizes => "PrizeName",
        }
    }

    /// Columns that must be present in the header row.
    pub fn required_columns(self) -> [&'static str; 2] {
        [ID_COLUMN, self.name_column()]
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Participants => "Participants",
            EntryKind::Prizes => "Prizes",
        }
    }

    /// Lower-case singular noun for row-level messages.
    pub fn noun(self) -> &'static str {
        match self {
            EntryKind::Participants => "participant",
            EntryKind::Prizes => "prize",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One raffle entry: a participant or a prize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

// Custom error type for CSV ingestion. Exactly one variant resolves per
// parse attempt; errors are returned, never thrown across the boundary.
#[derive(Debug)]
pub enum ParseError {
    /// The reader itself failed (broken quoting, invalid encoding).
    Malformed(String),
    /// A header was present but no data rows survived blank-row removal.
    EmptyInput,
    /// Required column(s) absent from the header row.
    MissingColumns {
        kind: EntryKind,
        missing: Vec<&'static str>,
    },
    /// Rows existed but none had both required fields populated.
    NoValidRows(EntryKind),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed(msg) => write!(f, "Failed to parse CSV: {}", msg),
            ParseError::EmptyInput => write!(f, "CSV file is empty or has no valid data"),
            ParseError::MissingColumns { kind, missing } => write!(
                f,
                "{} CSV must have {} and {} columns (missing: {})",
                kind,
                ID_COLUMN,
                kind.name_column(),
                missing.join(", ")
            ),
            ParseError::NoValidRows(kind) => {
                write!(f, "No valid {} entries found", kind.noun())
            }
        }
    }
}

impl std::error::Error for ParseError {}

fn cell(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

/// Parse raw CSV bytes into a validated entry list.
///
/// The first line is the header; its cell values are trimmed before column
/// lookup. Rows whose every cell is blank are dropped before any other check,
/// then rows missing a required field are dropped silently. Surviving rows
/// keep their source order, which later determines the wheel's angular
/// layout.
///
/// # Errors
/// * [`ParseError::Malformed`] when the underlying reader fails
/// * [`ParseError::EmptyInput`] when no data rows remain after blank removal
/// * [`ParseError::MissingColumns`] when the header lacks required columns
/// * [`ParseError::NoValidRows`] when row filtering leaves nothing
pub fn parse_entries(raw: &[u8], kind: EntryKind) -> Result<Vec<Entry>, ParseError> {
    // Flexible record widths: short rows read as empty cells and get dropped
    // by the field filter below, the same way the original lenient parser
    // padded them.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::Malformed(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Malformed(e.to_string()))?;
        // Greedy blank-row removal, applied before any column checks.
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record);
    }

    if rows.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let id_index = headers.iter().position(|h| h == ID_COLUMN);
    let name_index = headers.iter().position(|h| h == kind.name_column());
    let image_index = headers.iter().position(|h| h == IMAGE_COLUMN);

    let (id_index, name_index) = match (id_index, name_index) {
        (Some(id), Some(name)) => (id, name),
        (id, name) => {
            let mut missing = Vec::new();
            if id.is_none() {
                missing.push(ID_COLUMN);
            }
            if name.is_none() {
                missing.push(kind.name_column());
            }
            return Err(ParseError::MissingColumns { kind, missing });
        }
    };

    let mut entries = Vec::with_capacity(rows.len());
    for record in &rows {
        if cell(record, id_index).is_empty() || cell(record, name_index).trim().is_empty() {
            debug!("Skipping {} row without both required fields", kind.noun());
            continue;
        }

        // A whitespace-only id survives the filter above but trims to
        // nothing; fall back to the 1-based position among surviving rows.
        let trimmed_id = cell(record, id_index).trim();
        let id = if trimmed_id.is_empty() {
            (entries.len() + 1).to_string()
        } else {
            trimmed_id.to_string()
        };

        let name = cell(record, name_index).trim().to_string();

        let image_url = image_index
            .map(|index| cell(record, index).trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        entries.push(Entry {
            id,
            name,
            image_url,
        });
    }

    if entries.is_empty() {
        return Err(ParseError::NoValidRows(kind));
    }

    info!("Loaded {} {} entries from CSV", entries.len(), kind.noun());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_participants() {
        let entries = parse_entries(b"ID,Name\n1,Alice\n2,Bob\n", EntryKind::Participants)
            .expect("two valid rows");
        assert_eq!(
            entries,
            vec![
                Entry {
                    id: "1".into(),
                    name: "Alice".into(),
                    image_url: None,
                },
                Entry {
                    id: "2".into(),
                    name: "Bob".into(),
                    image_url: None,
                },
            ]
        );
    }

    #[test]
    fn prize_name_column_maps_to_the_display_name() {
        let entries =
            parse_entries(b"ID,PrizeName\n10,Toaster\n", EntryKind::Prizes).expect("valid prize");
        assert_eq!(entries[0].name, "Toaster");
        assert_eq!(entries[0].id, "10");
    }

    #[test]
    fn missing_prize_name_column_is_reported_by_name() {
        let err = parse_entries(b"ID,Name\n1,Toaster\n", EntryKind::Prizes)
            .expect_err("prizes need PrizeName");
        assert!(matches!(
            err,
            ParseError::MissingColumns {
                kind: EntryKind::Prizes,
                ..
            }
        ));
        assert!(err.to_string().contains("PrizeName"));
    }

    #[test]
    fn all_missing_columns_are_listed() {
        let err = parse_entries(b"Foo,Bar\nx,y\n", EntryKind::Participants)
            .expect_err("nothing required present");
        let message = err.to_string();
        assert!(message.contains("ID") && message.contains("Name"));
    }

    #[test]
    fn header_only_input_is_empty() {
        let err = parse_entries(b"ID,Name\n", EntryKind::Participants).expect_err("no data rows");
        assert!(matches!(err, ParseError::EmptyInput));
    }

    #[test]
    fn blank_rows_are_removed_before_column_checks() {
        // All-blank data under a wrong header resolves as empty input, not as
        // a column error.
        let err = parse_entries(b"Wrong,Header\n,\n  ,  \n\n", EntryKind::Participants)
            .expect_err("only blank rows");
        assert!(matches!(err, ParseError::EmptyInput));
    }

    #[test]
    fn rows_missing_required_fields_are_dropped_silently() {
        let raw = b"ID,Name\n1,Alice\n2,\n,Bob\n3,Carol\n";
        let entries = parse_entries(raw, EntryKind::Participants).expect("two rows survive");
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Carol"]);
    }

    #[test]
    fn filtering_everything_away_is_its_own_error() {
        let err = parse_entries(b"ID,Name\n1,\n,Bob\n", EntryKind::Participants)
            .expect_err("no complete rows");
        assert!(matches!(err, ParseError::NoValidRows(EntryKind::Participants)));
        assert_eq!(err.to_string(), "No valid participant entries found");
    }

    #[test]
    fn whitespace_id_falls_back_to_the_surviving_position() {
        let entries = parse_entries(b"ID,Name\n7,Alice\n   ,Bob\n", EntryKind::Participants)
            .expect("both rows survive");
        assert_eq!(entries[0].id, "7");
        assert_eq!(entries[1].id, "2");
    }

    #[test]
    fn image_url_is_optional_and_trimmed() {
        let raw = b"ID,Name,ImageURL\n1,Alice, http://host/a.png \n2,Bob,   \n";
        let entries = parse_entries(raw, EntryKind::Participants).expect("valid rows");
        assert_eq!(entries[0].image_url.as_deref(), Some("http://host/a.png"));
        assert_eq!(entries[1].image_url, None);
    }

    #[test]
    fn header_cells_are_trimmed_before_lookup() {
        let entries =
            parse_entries(b" ID , Name \n1,Alice\n", EntryKind::Participants).expect("padded header");
        assert_eq!(entries[0].name, "Alice");
    }

    #[test]
    fn ragged_rows_read_as_missing_cells() {
        let raw = b"ID,Name,ImageURL\n1,Alice\n2,Bob,img.png,extra\n";
        let entries = parse_entries(raw, EntryKind::Participants).expect("lenient widths");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].image_url, None);
        assert_eq!(entries[1].image_url.as_deref(), Some("img.png"));
    }

    #[test]
    fn source_order_is_preserved() {
        let raw = b"ID,Name\n9,Zoe\n1,Ann\n5,Mia\n";
        let entries = parse_entries(raw, EntryKind::Participants).expect("valid rows");
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["9", "1", "5"]);
    }

    #[test]
    fn invalid_encoding_is_malformed() {
        let err = parse_entries(b"ID,Name\n1,\xff\xfe\n", EntryKind::Participants)
            .expect_err("not valid UTF-8");
        assert!(matches!(err, ParseError::Malformed(_)));
        assert!(err.to_string().starts_with("Failed to parse CSV"));
    }

    #[test]
    fn entry_count_matches_fully_populated_rows() {
        let raw = b"ID,Name\n1,Alice\n\n2,Bob\n,\n3,\n4,Dave\n";
        // Populated rows after blank removal: (1,Alice), (2,Bob), (4,Dave).
        let entries = parse_entries(raw, EntryKind::Participants).expect("three rows survive");
        assert_eq!(entries.len(), 3);
    }
}
