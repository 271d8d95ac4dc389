//! Normalization of raw crowd-sourced body records.
//!
//! Every field is parsed independently: fields with a documented fallback
//! (fauna, flora, hab_rank, planet_length) warn and default on bad input,
//! malformed biome entries warn and drop, and everything else that fails to
//! parse aborts the run. Gravity in particular has no fallback; a bad
//! gravity string is a data-entry error that must be corrected at the
//! source.

use anyhow::{bail, Result};
use serde_json::Value;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use crate::error::DataError;
use crate::galaxy;
use crate::model::{self, Biome, Body, OrganicResource};
use crate::raw::RawRecord;
use crate::report::Report;

/// Stage 1 of the pipeline: read the raw crowd-sourced file from
/// `data_dir`, normalize and sort it, and write `galaxy.json` next to it.
/// Returns the number of bodies written.
pub fn restructure(data_dir: &Path, report: &mut impl Report) -> Result<u64> {
    let raw_root = model::load_raw(data_dir)?;
    let bodies = normalize_galaxy(&raw_root, report)?;
    let canonical = galaxy::assemble(bodies);
    model::write_galaxy(data_dir, &canonical)?;
    Ok(canonical.len() as u64)
}

/// Walk the nested `{system: {body: {...}}}` raw map and normalize every
/// body record in it.
pub fn normalize_galaxy(raw_root: &Value, report: &mut impl Report) -> Result<Vec<Body>> {
    let systems = match raw_root.as_object() {
        Some(map) => map,
        None => bail!("raw data file must be a JSON object keyed by system name"),
    };

    let mut bodies = Vec::new();
    for (system_name, system_bodies) in systems {
        let system_bodies = match system_bodies.as_object() {
            Some(map) => map,
            None => bail!("system '{}' must be a JSON object keyed by body name", system_name),
        };
        for (body_name, raw_body) in system_bodies {
            let record = RawRecord::from_value(raw_body);
            bodies.push(normalize_body(system_name, body_name, &record, report)?);
        }
    }

    Ok(bodies)
}

/// Convert one raw record into a canonical [`Body`].
pub fn normalize_body(
    system: &str,
    name: &str,
    raw: &RawRecord,
    report: &mut impl Report,
) -> Result<Body, DataError> {
    let mut body = Body {
        system: system.to_string(),
        name: name.to_string(),
        ..Default::default()
    };

    body.atmosphere = require_text(raw, "atmosphere", system, name)?.to_lowercase();
    body.magnetosphere = require_text(raw, "magnetosphere", system, name)?.to_lowercase();
    body.temperature = require_text(raw, "temperature", system, name)?.to_lowercase();
    body.water = require_text(raw, "water", system, name)?.to_lowercase();
    body.body_type = require_text(raw, "type", system, name)?;

    body.fauna = parse_or_default(
        &require_text(raw, "fauna", system, name)?,
        "fauna count",
        0,
        system,
        name,
        report,
    );
    body.flora = parse_or_default(
        &require_text(raw, "flora", system, name)?,
        "flora count",
        0,
        system,
        name,
        report,
    );
    body.hab_rank = parse_or_default(
        &require_text(raw, "hab_rank", system, name)?,
        "hab rank",
        0,
        system,
        name,
        report,
    );
    body.planet_length =
        parse_planet_length(&require_text(raw, "planet_length", system, name)?, system, name, report);
    body.gravity = parse_gravity(&require_text(raw, "gravity", system, name)?, system, name)?;

    for entry in raw.texts("biomes") {
        match parse_biome(&entry) {
            Some(biome) => body.biomes.push(biome),
            None => report.warn(format!(
                "invalid biome ('{}') for {} -> {}, skipping",
                entry, system, name
            )),
        }
    }
    body.biomes.sort_by(|a, b| a.name.cmp(&b.name));

    body.traits = raw.texts("traits");
    body.traits.sort();

    // Deliberately left in source order; resolution against the catalog
    // happens at load time.
    body.resources = raw.texts("resources");

    body.domesticable = raw.texts("domesticable").iter().map(|s| parse_organic(s)).collect();
    body.domesticable.sort_by(|a, b| a.name.cmp(&b.name));

    body.gatherable = raw.texts("gatherable").iter().map(|s| parse_organic(s)).collect();
    body.gatherable.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(body)
}

fn require_text(
    raw: &RawRecord,
    field: &'static str,
    system: &str,
    body: &str,
) -> Result<String, DataError> {
    raw.text(field).ok_or_else(|| DataError::MissingField {
        field,
        system: system.to_string(),
        body: body.to_string(),
    })
}

/// Parse an integer field that has a defined fallback.
fn parse_or_default<T: FromStr + Display + Copy>(
    value: &str,
    label: &str,
    default: T,
    system: &str,
    body: &str,
    report: &mut impl Report,
) -> T {
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            report.warn(format!(
                "invalid {} ('{}') for {} -> {}, defaulting to {}",
                label, value, system, body, default
            ));
            default
        }
    }
}

/// Day length arrives as `"<hours> <unit>"`; only the leading integer
/// matters. Anything unparseable defaults to 24.
fn parse_planet_length(value: &str, system: &str, body: &str, report: &mut impl Report) -> i64 {
    match value.split_whitespace().next().and_then(|t| t.parse().ok()) {
        Some(hours) => hours,
        None => {
            report.warn(format!(
                "invalid planet length ('{}') for {} -> {}, defaulting to 24",
                value, system, body
            ));
            24
        }
    }
}

/// Gravity arrives as `"<float>g"`. No fallback: a parse failure aborts
/// the run.
fn parse_gravity(value: &str, system: &str, body: &str) -> Result<f64, DataError> {
    let stripped = value.trim().trim_end_matches('g').trim();
    stripped.parse().map_err(|_| DataError::InvalidField {
        field: "gravity",
        value: value.to_string(),
        system: system.to_string(),
        body: body.to_string(),
    })
}

/// `"<name> <pct>%"` or a bare name with implicit 0% coverage. A `%` entry
/// whose percentage does not parse yields `None` and is dropped.
fn parse_biome(entry: &str) -> Option<Biome> {
    if !entry.contains('%') {
        return Some(Biome {
            name: entry.to_string(),
            coverage: 0.0,
        });
    }

    let tokens: Vec<&str> = entry.split_whitespace().collect();
    let (last, name_tokens) = tokens.split_last()?;
    let percent: f64 = last.trim_end_matches('%').parse().ok()?;
    Some(Biome {
        name: name_tokens.join(" "),
        coverage: percent / 100.0,
    })
}

/// `"<organism name>(<resource name>)"`, split on the first `(`. An entry
/// with no parenthesis uses the whole string for both fields.
fn parse_organic(entry: &str) -> OrganicResource {
    match entry.split_once('(') {
        Some((organism, rest)) => OrganicResource {
            name: organism.trim().to_string(),
            resource: rest.strip_suffix(')').unwrap_or(rest).trim().to_string(),
        },
        None => OrganicResource {
            name: entry.trim().to_string(),
            resource: entry.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReport;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(&value)
    }

    fn base_record() -> Value {
        json!({
            "atmosphere": "Thin CO2",
            "magnetosphere": "None",
            "temperature": "Frozen",
            "water": "None",
            "type": "Barren",
            "fauna": "0",
            "flora": "0",
            "hab_rank": "5",
            "planet_length": "24 hours",
            "gravity": "1.0g",
            "biomes": [],
            "traits": [],
            "resources": [],
            "domesticable": [],
            "gatherable": []
        })
    }

    fn with_field(field: &str, value: Value) -> RawRecord {
        let mut raw = base_record();
        raw[field] = value;
        record(raw)
    }

    #[test]
    fn test_bad_counts_default_to_zero_with_a_warning() {
        let mut report = RecordingReport::new();
        let raw = with_field("fauna", json!("abundant"));
        let body = normalize_body("Sol", "Earth", &raw, &mut report).unwrap();
        assert_eq!(body.fauna, 0);
        assert!(report.warned_about("invalid fauna count ('abundant') for Sol -> Earth"));
    }

    #[test]
    fn test_bad_hab_rank_defaults_to_zero() {
        let mut report = RecordingReport::new();
        let raw = with_field("hab_rank", json!("N/A"));
        let body = normalize_body("Sol", "Mars", &raw, &mut report).unwrap();
        assert_eq!(body.hab_rank, 0);
        assert!(report.warned_about("invalid hab rank"));
    }

    #[test]
    fn test_planet_length_takes_the_leading_integer() {
        let mut report = RecordingReport::new();
        let raw = with_field("planet_length", json!("39 hours"));
        let body = normalize_body("Sol", "Venus", &raw, &mut report).unwrap();
        assert_eq!(body.planet_length, 39);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_unparseable_planet_length_defaults_to_24() {
        let mut report = RecordingReport::new();
        let raw = with_field("planet_length", json!("unknown"));
        let body = normalize_body("Sol", "Venus", &raw, &mut report).unwrap();
        assert_eq!(body.planet_length, 24);
        assert!(report.warned_about("invalid planet length ('unknown')"));
    }

    #[test]
    fn test_gravity_unit_is_stripped() {
        let mut report = RecordingReport::new();
        let raw = with_field("gravity", json!(" 0.38g "));
        let body = normalize_body("Sol", "Mars", &raw, &mut report).unwrap();
        assert!((body.gravity - 0.38).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_gravity_is_fatal() {
        let mut report = RecordingReport::new();
        let raw = with_field("gravity", json!("heavy"));
        let result = normalize_body("Sol", "Jupiter", &raw, &mut report);
        assert!(matches!(
            result,
            Err(DataError::InvalidField {
                field: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_scalar_field_is_fatal() {
        let mut report = RecordingReport::new();
        let mut raw = base_record();
        raw.as_object_mut().unwrap().remove("water");
        let result = normalize_body("Sol", "Mercury", &record(raw), &mut report);
        assert!(matches!(
            result,
            Err(DataError::MissingField { field: "water", .. })
        ));
    }

    #[test]
    fn test_descriptive_fields_are_lowercased() {
        let mut report = RecordingReport::new();
        let raw = with_field("temperature", json!("Inferno"));
        let body = normalize_body("Sol", "Venus", &raw, &mut report).unwrap();
        assert_eq!(body.temperature, "inferno");
        assert_eq!(body.atmosphere, "thin co2");
    }

    #[test]
    fn test_biomes_parse_and_sort_by_name() {
        let mut report = RecordingReport::new();
        let raw = with_field("biomes", json!(["Desert", "Arctic 40%"]));
        let body = normalize_body("Sol", "Earth", &raw, &mut report).unwrap();
        assert_eq!(
            body.biomes,
            vec![
                Biome {
                    name: "Arctic".to_string(),
                    coverage: 0.40
                },
                Biome {
                    name: "Desert".to_string(),
                    coverage: 0.0
                },
            ]
        );
    }

    #[test]
    fn test_multi_word_biome_names_keep_single_spaces() {
        let biome = parse_biome("Frozen  Volcanic   Flats 12%").unwrap();
        assert_eq!(biome.name, "Frozen Volcanic Flats");
        assert!((biome.coverage - 0.12).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_biome_coverage_drops_the_entry() {
        let mut report = RecordingReport::new();
        let raw = with_field("biomes", json!(["Swamp x%", "Tundra 30%"]));
        let body = normalize_body("Sol", "Earth", &raw, &mut report).unwrap();
        assert_eq!(body.biomes.len(), 1);
        assert_eq!(body.biomes[0].name, "Tundra");
        assert!(report.warned_about("invalid biome ('Swamp x%')"));
    }

    #[test]
    fn test_organics_split_on_the_first_paren() {
        let organic = parse_organic("Void Sloth (Argon)");
        assert_eq!(organic.name, "Void Sloth");
        assert_eq!(organic.resource, "Argon");
    }

    #[test]
    fn test_organics_sort_by_organism_name() {
        let mut report = RecordingReport::new();
        let raw = with_field(
            "domesticable",
            json!(["Void Sloth (Argon)", "Cave Crab (Iron)"]),
        );
        let body = normalize_body("Sol", "Titan", &raw, &mut report).unwrap();
        let names: Vec<&str> = body.domesticable.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Cave Crab", "Void Sloth"]);
    }

    #[test]
    fn test_traits_sort_and_keep_duplicates() {
        let mut report = RecordingReport::new();
        let raw = with_field("traits", json!(["Sentient", "Charred", "Sentient"]));
        let body = normalize_body("Sol", "Io", &raw, &mut report).unwrap();
        assert_eq!(body.traits, vec!["Charred", "Sentient", "Sentient"]);
    }

    #[test]
    fn test_resources_keep_source_order() {
        let mut report = RecordingReport::new();
        let raw = with_field("resources", json!(["Pb", "Iron", "Ar"]));
        let body = normalize_body("Sol", "Io", &raw, &mut report).unwrap();
        assert_eq!(body.resources, vec!["Pb", "Iron", "Ar"]);
    }

    #[test]
    fn test_normalize_galaxy_walks_every_system() {
        let mut report = RecordingReport::new();
        let root = json!({
            "Alpha Centauri": {"Jemison": base_record()},
            "Sol": {"Earth": base_record(), "Mars": base_record()},
        });
        let bodies = normalize_galaxy(&root, &mut report).unwrap();
        assert_eq!(bodies.len(), 3);
    }

    #[test]
    fn test_normalize_galaxy_rejects_a_non_object_root() {
        let mut report = RecordingReport::new();
        assert!(normalize_galaxy(&json!(["not", "a", "map"]), &mut report).is_err());
    }
}
