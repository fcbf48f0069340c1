//! Edge-list ingestion from delimited text
//!
//! Each record is one edge: two fields separated by a caller-supplied
//! delimiter. Numeric mode parses both fields as integer vertex ids; named
//! mode accepts arbitrary strings and interns them, assigning ids in order
//! of first appearance. Fields are trimmed of surrounding spaces and tabs,
//! whitespace-only lines are skipped, and the first malformed record aborts
//! the read with no partial result.

use crate::graph::{GraphStore, VertexId};
use indexmap::IndexSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Lines between progress reports while loading large inputs
const PROGRESS_INTERVAL: u64 = 100_000;

/// Errors that can occur while reading an edge list
#[derive(Error, Debug)]
pub enum ReadError {
    /// A record does not conform to the two-field edge format
    #[error("line {line}: malformed record {record:?}: {reason}")]
    Format {
        /// 1-based input line number
        line: u64,
        record: String,
        reason: String,
    },

    #[error("failed to read edge list: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReadResult<T> = Result<T, ReadError>;

/// Interned vertex names for inputs whose endpoints are strings rather
/// than integers.
///
/// Ids are assigned densely in order of first appearance, starting at 0.
#[derive(Debug, Default)]
pub struct VertexNames {
    names: IndexSet<String>,
}

impl VertexNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning its vertex id
    pub fn intern(&mut self, name: &str) -> VertexId {
        let index = match self.names.get_index_of(name) {
            Some(index) => index,
            None => self.names.insert_full(name.to_string()).0,
        };
        VertexId::new(index as i64)
    }

    /// Name behind a previously interned id
    pub fn name(&self, vertex: VertexId) -> Option<&str> {
        usize::try_from(vertex.as_i64())
            .ok()
            .and_then(|index| self.names.get_index(index))
            .map(|name| name.as_str())
    }

    /// Number of interned names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Read a numeric edge list: each record holds two integer vertex ids.
pub fn read_edge_list<R: BufRead>(input: R, delimiter: &str) -> ReadResult<GraphStore> {
    let mut store = GraphStore::new();
    let lines = for_each_record(input, delimiter, |number, record, source, target| {
        let source = parse_vertex(number, record, source)?;
        let target = parse_vertex(number, record, target)?;
        store.add_edge(source, target);
        Ok(())
    })?;
    info!(
        "read {} lines, {} vertices, {} edges",
        lines,
        store.vertex_count(),
        store.edge_count()
    );
    Ok(store)
}

/// Read an edge list whose fields are arbitrary names.
///
/// Names are interned in order of first appearance; the returned
/// [`VertexNames`] maps the generated ids back to the input strings.
pub fn read_named_edge_list<R: BufRead>(
    input: R,
    delimiter: &str,
) -> ReadResult<(GraphStore, VertexNames)> {
    let mut store = GraphStore::new();
    let mut names = VertexNames::new();
    let lines = for_each_record(input, delimiter, |_, _, source, target| {
        let source = names.intern(source);
        let target = names.intern(target);
        store.add_edge(source, target);
        Ok(())
    })?;
    info!(
        "read {} lines, {} vertices, {} edges",
        lines,
        store.vertex_count(),
        store.edge_count()
    );
    Ok((store, names))
}

/// Read a numeric edge list from a file
pub fn read_edge_list_path(path: impl AsRef<Path>, delimiter: &str) -> ReadResult<GraphStore> {
    let file = File::open(path)?;
    read_edge_list(BufReader::new(file), delimiter)
}

/// Read a named edge list from a file
pub fn read_named_edge_list_path(
    path: impl AsRef<Path>,
    delimiter: &str,
) -> ReadResult<(GraphStore, VertexNames)> {
    let file = File::open(path)?;
    read_named_edge_list(BufReader::new(file), delimiter)
}

/// Walk the input line by line, handing each well-formed record's trimmed
/// fields to `handle`. Returns the number of lines seen.
fn for_each_record<R, F>(input: R, delimiter: &str, mut handle: F) -> ReadResult<u64>
where
    R: BufRead,
    F: FnMut(u64, &str, &str, &str) -> ReadResult<()>,
{
    let mut number = 0u64;
    for line in input.lines() {
        let line = line?;
        number += 1;

        if line.trim().is_empty() {
            continue;
        }

        let (source, target) = split_fields(&line, delimiter).ok_or_else(|| ReadError::Format {
            line: number,
            record: line.clone(),
            reason: format!("expected exactly two fields separated by {:?}", delimiter),
        })?;
        handle(number, &line, source, target)?;

        if number % PROGRESS_INTERVAL == 0 {
            debug!("read {} lines", number);
        }
    }
    Ok(number)
}

fn split_fields<'a>(record: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let mut fields = record.split(delimiter);
    let first = fields.next()?;
    let second = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some((trim_field(first), trim_field(second)))
}

fn trim_field(field: &str) -> &str {
    field.trim_matches(|c| c == ' ' || c == '\t')
}

fn parse_vertex(line: u64, record: &str, field: &str) -> ReadResult<VertexId> {
    field
        .parse::<i64>()
        .map(VertexId::new)
        .map_err(|_| ReadError::Format {
            line,
            record: record.to_string(),
            reason: format!("field {:?} is not an integer", field),
        })
}
