//! Canonical typed records for the survey dataset.
//!
//! Field names are the stable on-disk names used by `resources.json` and
//! `galaxy.json`. The raw crowd-sourced file never deserializes into these
//! types directly; it goes through [`crate::normalize`] first.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Catalog file consumed by the loader and the resource index.
pub const RESOURCES_FILE: &str = "resources.json";
/// Canonical galaxy file: normalizer output, loader input.
pub const GALAXY_FILE: &str = "galaxy.json";
/// Raw crowd-sourced data file, nested `{system: {body: {...}}}`.
pub const RAW_FILE: &str = "starfield_data_updated.json";
/// Output database file.
pub const DB_FILE: &str = "sf.db";

/// One entry of the resource catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Full name, unique within the catalog.
    pub resource: String,
    #[serde(rename = "shortName")]
    pub short_name: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub mass: f64,
    pub value: i64,
    #[serde(rename = "valueToMass")]
    pub value_to_mass: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    pub name: String,
    /// Surface coverage as a fraction in [0, 1].
    pub coverage: f64,
}

/// A flora or fauna entry linked to the resource it yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganicResource {
    pub name: String,
    pub resource: String,
}

/// Canonical celestial body. (system, name) is the composite key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Body {
    pub system: String,
    pub name: String,
    pub atmosphere: String,
    pub fauna: u32,
    pub flora: u32,
    pub gravity: f64,
    pub hab_rank: i64,
    pub magnetosphere: String,
    pub planet_length: i64,
    pub temperature: String,
    #[serde(rename = "type")]
    pub body_type: String,
    pub water: String,
    pub biomes: Vec<Biome>,
    pub traits: Vec<String>,
    pub resources: Vec<String>,
    pub domesticable: Vec<OrganicResource>,
    pub gatherable: Vec<OrganicResource>,
}

/// Load the resource catalog from `resources.json` in `data_dir`.
pub fn load_resources(data_dir: &Path) -> Result<Vec<Resource>> {
    let path = data_dir.join(RESOURCES_FILE);
    let file = File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {:?}", path))
}

/// Load the canonical galaxy from `galaxy.json` in `data_dir`.
pub fn load_galaxy(data_dir: &Path) -> Result<Vec<Body>> {
    let path = data_dir.join(GALAXY_FILE);
    let file = File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {:?}", path))
}

/// Write the canonical galaxy to `galaxy.json` in `data_dir`.
pub fn write_galaxy(data_dir: &Path, galaxy: &[Body]) -> Result<()> {
    let path = data_dir.join(GALAXY_FILE);
    let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, galaxy)
        .with_context(|| format!("Failed to write {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {:?}", path))
}

/// Load the raw crowd-sourced data file from `data_dir`.
pub fn load_raw(data_dir: &Path) -> Result<serde_json::Value> {
    let path = data_dir.join(RAW_FILE);
    let file = File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {:?}", path))
}
