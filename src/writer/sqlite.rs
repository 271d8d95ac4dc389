use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::path::Path;

use super::schema_gen::generate_schema;
use crate::error::DataError;
use crate::galaxy;
use crate::index::{DuplicatePolicy, ResourceIndex};
use crate::model::{self, Body, Resource, DB_FILE};
use crate::report::Report;

/// Exclusively owned handle to the output database. The store is
/// recreated from scratch on every run; there are no incremental updates.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn create(db_path: &Path) -> Result<Self> {
        // Remove existing database if present
        if db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }

        let conn = Connection::open(db_path).context("Failed to create database")?;

        // Enable foreign keys and optimize for bulk insert
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    /// Install the table schema: an external SQL file executed verbatim
    /// when given, the generated DDL otherwise.
    pub fn install_schema(&self, schema_file: Option<&Path>) -> Result<()> {
        let script = match schema_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema file {:?}", path))?,
            None => generate_schema(),
        };
        self.conn
            .execute_batch(&script)
            .context("Failed to install schema")
    }

    /// Insert the resource catalog. A duplicate full name violates the
    /// primary key and fails the run.
    pub fn insert_resources(&mut self, catalog: &[Resource]) -> Result<u64> {
        let tx = self.conn.transaction()?;
        let mut count: u64 = 0;
        {
            let mut stmt =
                tx.prepare_cached("INSERT INTO resources VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)")?;
            for resource in catalog {
                stmt.execute(params![
                    resource.resource,
                    resource.short_name,
                    resource.rarity,
                    resource.resource_type,
                    resource.mass,
                    resource.value,
                    resource.value_to_mass,
                ])
                .map_err(|e| map_insert_err("resources", &resource.resource, e))?;
                count += 1;
            }
        }
        tx.commit()?;
        Ok(count)
    }

    /// Insert one row per distinct system with its derived body count.
    /// Systems are the FK parent of bodies, so this runs before any body.
    pub fn insert_systems(&mut self, counts: &BTreeMap<String, i64>) -> Result<u64> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached("INSERT INTO systems VALUES (?1, ?2)")?;
            for (name, count) in counts {
                stmt.execute(params![name, count])
                    .map_err(|e| map_insert_err("systems", name, e))?;
            }
        }
        tx.commit()?;
        Ok(counts.len() as u64)
    }

    /// Insert every body and its fan-out rows, one transaction per body.
    ///
    /// A duplicate (system, name) key skips the body row with a diagnostic
    /// but still attempts the children; they reference the first-seen row.
    /// An unresolvable resource reference aborts the run, leaving every
    /// previously committed body in place.
    pub fn insert_bodies(
        &mut self,
        galaxy: &[Body],
        index: &ResourceIndex,
        report: &mut impl Report,
    ) -> Result<u64> {
        let mut count: u64 = 0;

        for body in galaxy {
            let tx = self.conn.transaction()?;
            {
                let inserted = tx.execute(
                    "INSERT INTO bodies VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                    params![
                        body.name,
                        body.system,
                        body.body_type,
                        body.gravity,
                        body.temperature,
                        body.atmosphere,
                        body.magnetosphere,
                        body.water,
                        body.fauna,
                        body.flora,
                        body.hab_rank,
                        body.planet_length,
                    ],
                );
                match inserted {
                    Ok(_) => count += 1,
                    Err(e) if is_constraint_violation(&e) => report.warn(format!(
                        "duplicate body {} -> {}, skipping row",
                        body.system, body.name
                    )),
                    Err(e) => {
                        return Err(e).with_context(|| {
                            format!("Failed to insert body {} -> {}", body.system, body.name)
                        })
                    }
                }

                let mut stmt = tx.prepare_cached("INSERT INTO traits VALUES (?1, ?2, ?3)")?;
                for body_trait in &body.traits {
                    stmt.execute(params![body.system, body.name, body_trait])?;
                    count += 1;
                }

                let mut stmt =
                    tx.prepare_cached("INSERT INTO body_resources VALUES (?1, ?2, ?3)")?;
                for reference in &body.resources {
                    let full_name = index.resolve(reference).with_context(|| {
                        format!("while loading body {} -> {}", body.system, body.name)
                    })?;
                    stmt.execute(params![body.system, body.name, full_name])?;
                    count += 1;
                }

                let mut stmt =
                    tx.prepare_cached("INSERT INTO body_organics VALUES (?1, ?2, ?3, ?4, ?5)")?;
                for organic in &body.domesticable {
                    stmt.execute(params![body.system, body.name, organic.name, organic.resource, true])?;
                    count += 1;
                }
                for organic in &body.gatherable {
                    stmt.execute(params![body.system, body.name, organic.name, organic.resource, false])?;
                    count += 1;
                }

                let mut stmt = tx.prepare_cached("INSERT INTO biomes VALUES (?1, ?2, ?3, ?4)")?;
                for biome in &body.biomes {
                    stmt.execute(params![body.system, body.name, biome.name, biome.coverage])?;
                    count += 1;
                }
            }
            tx.commit()?;
        }

        Ok(count)
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn map_insert_err(table: &'static str, key: &str, err: rusqlite::Error) -> anyhow::Error {
    if is_constraint_violation(&err) {
        DataError::SchemaViolation {
            table,
            key: key.to_string(),
            source: err,
        }
        .into()
    } else {
        err.into()
    }
}

/// Load `resources.json` and `galaxy.json` from `data_dir` into a fresh
/// `sf.db`. Returns the number of rows written.
pub fn create_db(
    data_dir: &Path,
    schema_file: Option<&Path>,
    policy: DuplicatePolicy,
    report: &mut impl Report,
) -> Result<u64> {
    let catalog = model::load_resources(data_dir)?;
    let galaxy = model::load_galaxy(data_dir)?;

    let mut store = SqliteStore::create(&data_dir.join(DB_FILE))?;
    store.install_schema(schema_file)?;

    report.info(format!("Inserting {} resources...", catalog.len()));
    let mut total = store.insert_resources(&catalog)?;

    let index = ResourceIndex::build(&catalog, policy)?;

    let counts = galaxy::system_counts(&galaxy);
    report.info(format!("Inserting {} systems...", counts.len()));
    total += store.insert_systems(&counts)?;

    report.info(format!("Inserting {} bodies...", galaxy.len()));
    total += store.insert_bodies(&galaxy, &index, report)?;

    Ok(total)
}
