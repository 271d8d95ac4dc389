//! Table schema definitions for the survey database

use super::types::*;

// =============================================================================
// Parent Tables (no FK dependencies)
// =============================================================================

pub static RESOURCES: TableSchema = TableSchema {
    name: "resources",
    columns: &[
        Column::required("resource", ColumnType::Text),
        Column::required("short_name", ColumnType::Text),
        Column::new("rarity", ColumnType::Text),
        Column::new("type", ColumnType::Text),
        Column::new("mass", ColumnType::Real),
        Column::new("value", ColumnType::Integer),
        Column::new("value_to_mass", ColumnType::Real),
    ],
    primary_key: &["resource"],
    foreign_keys: &[],
};

pub static SYSTEMS: TableSchema = TableSchema {
    name: "systems",
    columns: &[
        Column::required("name", ColumnType::Text),
        Column::required("body_count", ColumnType::Integer),
    ],
    primary_key: &["name"],
    foreign_keys: &[],
};

// =============================================================================
// Bodies and their fan-out tables
// =============================================================================

pub static BODIES: TableSchema = TableSchema {
    name: "bodies",
    columns: &[
        Column::required("name", ColumnType::Text),
        Column::required("system", ColumnType::Text),
        Column::new("type", ColumnType::Text),
        Column::new("gravity", ColumnType::Real),
        Column::new("temperature", ColumnType::Text),
        Column::new("atmosphere", ColumnType::Text),
        Column::new("magnetosphere", ColumnType::Text),
        Column::new("water", ColumnType::Text),
        Column::new("fauna", ColumnType::Integer),
        Column::new("flora", ColumnType::Integer),
        Column::new("hab_rank", ColumnType::Integer),
        Column::new("planet_length", ColumnType::Integer),
    ],
    primary_key: &["system", "name"],
    foreign_keys: &[ForeignKey::new(&["system"], "systems", &["name"])],
};

pub static TRAITS: TableSchema = TableSchema {
    name: "traits",
    columns: &[
        Column::required("system", ColumnType::Text),
        Column::required("body", ColumnType::Text),
        Column::required("trait", ColumnType::Text),
    ],
    primary_key: &[],
    foreign_keys: &[ForeignKey::new(&["system", "body"], "bodies", &["system", "name"])],
};

pub static BODY_RESOURCES: TableSchema = TableSchema {
    name: "body_resources",
    columns: &[
        Column::required("system", ColumnType::Text),
        Column::required("body", ColumnType::Text),
        Column::required("resource", ColumnType::Text),
    ],
    primary_key: &[],
    foreign_keys: &[
        ForeignKey::new(&["system", "body"], "bodies", &["system", "name"]),
        ForeignKey::new(&["resource"], "resources", &["resource"]),
    ],
};

pub static BODY_ORGANICS: TableSchema = TableSchema {
    name: "body_organics",
    columns: &[
        Column::required("system", ColumnType::Text),
        Column::required("body", ColumnType::Text),
        Column::required("name", ColumnType::Text),
        Column::required("resource", ColumnType::Text),
        Column::required("domesticable", ColumnType::Boolean),
    ],
    primary_key: &[],
    foreign_keys: &[ForeignKey::new(&["system", "body"], "bodies", &["system", "name"])],
};

pub static BIOMES: TableSchema = TableSchema {
    name: "biomes",
    columns: &[
        Column::required("system", ColumnType::Text),
        Column::required("body", ColumnType::Text),
        Column::required("name", ColumnType::Text),
        Column::new("coverage", ColumnType::Real),
    ],
    primary_key: &[],
    foreign_keys: &[ForeignKey::new(&["system", "body"], "bodies", &["system", "name"])],
};

/// All tables in insert order: parents before children.
pub static ALL_TABLES: &[&TableSchema] = &[
    &RESOURCES,
    &SYSTEMS,
    &BODIES,
    &TRAITS,
    &BODY_RESOURCES,
    &BODY_ORGANICS,
    &BIOMES,
];

/// All table names in insert order.
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
