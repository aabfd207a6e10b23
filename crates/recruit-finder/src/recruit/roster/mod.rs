mod normalizer;
mod parser;

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::domain::{Item, Operator, Rarity, TraitSet};
use parser::{as_string, RawOperator};

/// Fatal roster load failures. Per-record problems are reported as [`RosterIssue`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("roster is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("roster must be a JSON array of operator records")]
    NotAnArray,
}

/// Something wrong with a single record; the record was skipped or degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterIssue {
    pub index: usize,
    pub id: Option<u32>,
    pub kind: RosterIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterIssueKind {
    #[error("record is not an object: {0}")]
    NotAnObject(String),
    #[error("missing or non-integer id")]
    MissingId,
    #[error("duplicate id")]
    DuplicateId,
    #[error("rarity {0} is missing or outside 1..=6")]
    InvalidRarity(String),
    #[error("missing type")]
    MissingType,
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("tags field is neither a list nor a bracketed string")]
    MalformedTags,
    #[error("unknown tag '{0}'")]
    UnknownTag(String),
    #[error("type label '{0}' listed among tags")]
    TypeInTags(String),
    #[error("unparseable addDay '{0}'")]
    InvalidAddDay(String),
}

impl RosterIssue {
    /// Whether the record was dropped from the roster entirely.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            RosterIssueKind::NotAnObject(_)
                | RosterIssueKind::MissingId
                | RosterIssueKind::DuplicateId
                | RosterIssueKind::InvalidRarity(_)
        )
    }
}

impl std::fmt::Display for RosterIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "record #{} (id {}): {}", self.index, id, self.kind),
            None => write!(f, "record #{}: {}", self.index, self.kind),
        }
    }
}

/// Immutable operator collection the engine runs against.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    operators: Vec<Operator>,
    issues: Vec<RosterIssue>,
}

impl Roster {
    pub fn new(operators: Vec<Operator>) -> Self {
        Self {
            operators,
            issues: Vec::new(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_reader(std::io::BufReader::new(file))?;
        info!(
            path = %path.display(),
            operators = roster.len(),
            issues = roster.issues.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RosterError> {
        Self::from_reader(json.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let mut operators = Vec::new();
        let mut issues = Vec::new();
        let mut seen_ids = HashSet::new();

        for (index, record) in parser::parse_records(reader)?.into_iter().enumerate() {
            let raw = match record {
                Ok(raw) => raw,
                Err(err) => {
                    issues.push(RosterIssue {
                        index,
                        id: None,
                        kind: RosterIssueKind::NotAnObject(err.to_string()),
                    });
                    continue;
                }
            };

            let (operator, record_issues) = normalize_record(index, raw);
            issues.extend(record_issues);

            if let Some(operator) = operator {
                if seen_ids.insert(operator.id) {
                    operators.push(operator);
                } else {
                    issues.push(RosterIssue {
                        index,
                        id: Some(operator.id),
                        kind: RosterIssueKind::DuplicateId,
                    });
                }
            }
        }

        for issue in &issues {
            warn!(fatal = issue.is_fatal(), "{issue}");
        }

        Ok(Self { operators, issues })
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn issues(&self) -> &[RosterIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Operator> {
        self.operators.iter().find(|operator| operator.id == id)
    }
}

fn normalize_record(index: usize, raw: RawOperator) -> (Option<Operator>, Vec<RosterIssue>) {
    let mut kinds = Vec::new();

    let id = raw.id.as_u64().and_then(|value| u32::try_from(value).ok());

    let rarity = raw
        .rarity
        .as_u64()
        .and_then(|value| u8::try_from(value).ok())
        .and_then(|value| Rarity::try_from(value).ok());

    let operator_type = match &raw.operator_type {
        Value::Null => {
            kinds.push(RosterIssueKind::MissingType);
            None
        }
        value => match as_string(value).as_deref().and_then(Item::parse) {
            Some(Item::Type(operator_type)) => Some(operator_type),
            _ => {
                kinds.push(RosterIssueKind::UnknownType(display_value(value)));
                None
            }
        },
    };

    let tags = normalize_tags(&raw.tags, &mut kinds);

    let added_on = match as_string(&raw.add_day) {
        Some(text) if !text.trim().is_empty() => {
            match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    kinds.push(RosterIssueKind::InvalidAddDay(text));
                    None
                }
            }
        }
        _ => None,
    };

    let operator = match (id, rarity) {
        (Some(id), Some(rarity)) => Some(Operator {
            id,
            name: as_string(&raw.name).unwrap_or_default(),
            rarity,
            operator_type,
            tags,
            added_on,
            wiki: as_string(&raw.wiki).unwrap_or_default(),
            img_path: as_string(&raw.img_path).unwrap_or_default(),
        }),
        (None, _) => {
            kinds.push(RosterIssueKind::MissingId);
            None
        }
        (Some(_), None) => {
            kinds.push(RosterIssueKind::InvalidRarity(display_value(&raw.rarity)));
            None
        }
    };

    let issues = kinds
        .into_iter()
        .map(|kind| RosterIssue { index, id, kind })
        .collect();

    (operator, issues)
}

fn normalize_tags(value: &Value, kinds: &mut Vec<RosterIssueKind>) -> TraitSet {
    let entries: Vec<String> = match value {
        Value::Null => Vec::new(),
        Value::Array(values) => {
            let mut entries = Vec::with_capacity(values.len());
            for entry in values {
                match as_string(entry) {
                    Some(text) => entries.push(text),
                    None => {
                        kinds.push(RosterIssueKind::MalformedTags);
                        return TraitSet::new();
                    }
                }
            }
            entries
        }
        Value::String(text) => normalizer::split_legacy_tags(text),
        _ => {
            kinds.push(RosterIssueKind::MalformedTags);
            return TraitSet::new();
        }
    };

    let mut tags = TraitSet::new();
    for entry in entries {
        match Item::parse(&entry) {
            Some(Item::Type(_)) => kinds.push(RosterIssueKind::TypeInTags(entry)),
            Some(item) => {
                tags.insert(item);
            }
            None => kinds.push(RosterIssueKind::UnknownTag(entry)),
        }
    }
    tags
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
