use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use super::store::EntityId;
use crate::filings::{Deadline, DEADLINE_ENGINE_VERSION};

/// Deadlines for one entity, as the monitor run consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredEntity {
    pub entity_id: EntityId,
    pub engine_version: String,
    pub deadlines: Vec<Deadline>,
}

#[derive(Debug)]
pub enum DeadlineImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDueDate { line: u64, value: String },
    MissingEntityId { line: u64 },
}

impl fmt::Display for DeadlineImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineImportError::Io(err) => write!(f, "failed to read deadline export: {}", err),
            DeadlineImportError::Csv(err) => write!(f, "invalid deadline CSV data: {}", err),
            DeadlineImportError::InvalidDueDate { line, value } => write!(
                f,
                "line {}: due_date '{}' is not a YYYY-MM-DD date",
                line, value
            ),
            DeadlineImportError::MissingEntityId { line } => {
                write!(f, "line {}: entity_id is empty", line)
            }
        }
    }
}

impl std::error::Error for DeadlineImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeadlineImportError::Io(err) => Some(err),
            DeadlineImportError::Csv(err) => Some(err),
            DeadlineImportError::InvalidDueDate { .. }
            | DeadlineImportError::MissingEntityId { .. } => None,
        }
    }
}

impl From<std::io::Error> for DeadlineImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DeadlineImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct DeadlineImporter;

impl DeadlineImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MonitoredEntity>, DeadlineImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read `entity_id,form,due_date[,engine_version]` rows, grouped per entity in
    /// first-seen order. The first non-empty engine version for an entity wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MonitoredEntity>, DeadlineImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut grouped: Vec<(String, Option<String>, Vec<Deadline>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        let headers = csv_reader.headers()?.clone();
        for record in csv_reader.records() {
            let record = record?;
            // Physical line where the record starts; quoted fields may span lines.
            let line = record.position().map_or(0, |position| position.line());
            let row: DeadlineRow = record.deserialize(Some(&headers))?;

            if row.entity_id.is_empty() {
                return Err(DeadlineImportError::MissingEntityId { line });
            }

            let due_date = NaiveDate::parse_from_str(&row.due_date, "%Y-%m-%d").map_err(|_| {
                DeadlineImportError::InvalidDueDate {
                    line,
                    value: row.due_date.clone(),
                }
            })?;

            let position = match positions.get(&row.entity_id) {
                Some(position) => *position,
                None => {
                    positions.insert(row.entity_id.clone(), grouped.len());
                    grouped.push((row.entity_id.clone(), None, Vec::new()));
                    grouped.len() - 1
                }
            };

            let (_, engine_version, deadlines) = &mut grouped[position];
            if engine_version.is_none() {
                *engine_version = row.engine_version;
            }
            deadlines.push(Deadline {
                form: row.form,
                due_date,
                basis: row.basis.unwrap_or_default(),
            });
        }

        let entities = grouped
            .into_iter()
            .map(|(entity_id, engine_version, deadlines)| MonitoredEntity {
                entity_id: EntityId(entity_id),
                engine_version: engine_version
                    .unwrap_or_else(|| DEADLINE_ENGINE_VERSION.to_string()),
                deadlines,
            })
            .collect();

        Ok(entities)
    }
}

#[derive(Debug, Deserialize)]
struct DeadlineRow {
    entity_id: String,
    form: String,
    due_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    engine_version: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    basis: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn groups_rows_by_entity_in_first_seen_order() {
        let csv = "entity_id,form,due_date,engine_version\n\
ent-b,Form 5472,2026-04-15,v1.0.0\n\
ent-a,Form 5472,2026-04-15,\n\
ent-b,Pro Forma 1120,2026-04-15,v0.9.0\n";

        let entities = DeadlineImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].entity_id, EntityId("ent-b".to_string()));
        assert_eq!(entities[0].engine_version, "v1.0.0");
        assert_eq!(entities[0].deadlines.len(), 2);
        assert_eq!(entities[1].entity_id.as_str(), "ent-a");
        assert_eq!(entities[1].engine_version, DEADLINE_ENGINE_VERSION);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let csv = "entity_id,form,due_date\n ent-1 , Form 5472 , 2026-04-15 \n";
        let entities = DeadlineImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(entities[0].entity_id.as_str(), "ent-1");
        assert_eq!(entities[0].deadlines[0].form, "Form 5472");
        assert!(entities[0].deadlines[0].basis.is_empty());
    }

    #[test]
    fn rejects_malformed_due_date_with_line_number() {
        let csv = "entity_id,form,due_date\nent-1,Form 5472,2026-04-15\nent-1,Form 5472,04/15/2026\n";
        match DeadlineImporter::from_reader(Cursor::new(csv)) {
            Err(DeadlineImportError::InvalidDueDate { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "04/15/2026");
            }
            other => panic!("expected invalid due date, got {other:?}"),
        }
    }

    #[test]
    fn line_numbers_follow_multiline_quoted_fields() {
        let csv = "entity_id,form,due_date,basis\n\
ent-1,Form 5472,2026-04-15,\"Reporting due\nwith Form 1120\"\n\
ent-1,Pro Forma 1120,2026-13-40,\n";
        match DeadlineImporter::from_reader(Cursor::new(csv)) {
            Err(DeadlineImportError::InvalidDueDate { line, value }) => {
                assert_eq!(line, 4);
                assert_eq!(value, "2026-13-40");
            }
            other => panic!("expected invalid due date, got {other:?}"),
        }
    }

    #[test]
    fn multiline_basis_is_kept_intact() {
        let csv = "entity_id,form,due_date,basis\nent-1,Form 5472,2026-04-15,\"first\nsecond\"\n";
        let entities = DeadlineImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(entities[0].deadlines[0].basis, "first\nsecond");
    }

    #[test]
    fn rejects_blank_entity_id() {
        let csv = "entity_id,form,due_date\n,Form 5472,2026-04-15\n";
        assert!(matches!(
            DeadlineImporter::from_reader(Cursor::new(csv)),
            Err(DeadlineImportError::MissingEntityId { line: 2 })
        ));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        match DeadlineImporter::from_path("./does-not-exist.csv") {
            Err(DeadlineImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
