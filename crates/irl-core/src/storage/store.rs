use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition, TableError, TableHandle};
use tracing::debug;

use super::codec::{decode_measure, encode_measure};
use super::ResultStore;
use crate::error::StoreError;
use crate::result::{EvalResult, AGGREGATE_TOPIC};

const TEAM_TABLE_PREFIX: &str = "team/";

type MeasureTable<'a> = TableDefinition<'a, (&'static str, &'static str), &'static [u8]>;

fn table_name(team: &str) -> String {
    format!("{TEAM_TABLE_PREFIX}{team}")
}

fn team_table(name: &str) -> MeasureTable<'_> {
    TableDefinition::new(name)
}

/// redb-backed store of run measures.
///
/// Each [`put`](Self::put) is one write transaction; readers always see a
/// fully committed state. Cloning shares the underlying database.
#[derive(Clone)]
pub struct RunStore {
    db: Arc<Database>,
}

impl RunStore {
    /// Opens or creates a database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened run store");
        Ok(Self { db: Arc::new(db) })
    }

    /// Non-persistent store, for tests and dry runs.
    pub fn memory() -> Result<Self, StoreError> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Stores the aggregate measures of `result` under `team` / `run`.
    ///
    /// Existing measures of the same run are overwritten one by one; measures
    /// missing from `result` are left in place. Topics other than
    /// [`AGGREGATE_TOPIC`] are not stored.
    pub fn put(&self, team: &str, run: &str, result: &EvalResult) -> Result<(), StoreError> {
        let name = table_name(team);
        let txn = self.db.begin_write()?;
        let mut written = 0usize;
        {
            let mut table = txn.open_table(team_table(&name))?;
            if let Some(measures) = result.topics.get(AGGREGATE_TOPIC) {
                for (measure, value) in measures {
                    let bytes = encode_measure(*value);
                    table.insert((run, measure.as_str()), bytes.as_slice())?;
                    written += 1;
                }
            }
        }
        txn.commit()?;

        debug!(team, run, measures = written, "stored run");
        Ok(())
    }

    /// All runs stored for `team`, keyed by run id.
    ///
    /// A team that never submitted yields an empty map.
    pub fn get_all_for_team(
        &self,
        team: &str,
    ) -> Result<BTreeMap<String, EvalResult>, StoreError> {
        let name = table_name(team);
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(team_table(&name)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut runs: BTreeMap<String, EvalResult> = BTreeMap::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let (run, measure) = key.value();
            let value = decode_value(team, run, measure, value.value())?;
            runs.entry(run.to_string())
                .or_insert_with(|| EvalResult::new(run))
                .insert(AGGREGATE_TOPIC, measure, value);
        }
        Ok(runs)
    }

    /// A single stored run, or `None` if the team or run is absent.
    pub fn get_run(&self, team: &str, run: &str) -> Result<Option<EvalResult>, StoreError> {
        let name = table_name(team);
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(team_table(&name)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut result: Option<EvalResult> = None;
        for entry in table.range((run, "")..)? {
            let (key, value) = entry?;
            let (stored_run, measure) = key.value();
            if stored_run != run {
                break;
            }
            let value = decode_value(team, run, measure, value.value())?;
            result
                .get_or_insert_with(|| EvalResult::new(run))
                .insert(AGGREGATE_TOPIC, measure, value);
        }
        Ok(result)
    }

    /// Runs of several teams at once. Stops at the first failing team.
    pub fn get_runs<'a, I>(
        &self,
        teams: I,
    ) -> Result<BTreeMap<String, BTreeMap<String, EvalResult>>, StoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        teams
            .into_iter()
            .map(|team| {
                self.get_all_for_team(team)
                    .map(|runs| (team.to_string(), runs))
            })
            .collect()
    }

    /// Keys of every team with a container in the store, sorted.
    pub fn teams(&self) -> Result<Vec<String>, StoreError> {
        let txn = self.db.begin_read()?;
        let mut teams: Vec<String> = txn
            .list_tables()?
            .filter_map(|handle| {
                handle
                    .name()
                    .strip_prefix(TEAM_TABLE_PREFIX)
                    .map(str::to_string)
            })
            .collect();
        teams.sort();
        Ok(teams)
    }
}

impl ResultStore for RunStore {
    fn get_all_for_team(&self, team: &str) -> Result<BTreeMap<String, EvalResult>, StoreError> {
        RunStore::get_all_for_team(self, team)
    }
}

fn decode_value(team: &str, run: &str, measure: &str, bytes: &[u8]) -> Result<f64, StoreError> {
    decode_measure(bytes).ok_or_else(|| StoreError::CorruptMeasure {
        team: team.to_string(),
        run: run.to_string(),
        measure: measure.to_string(),
        len: bytes.len(),
    })
}
