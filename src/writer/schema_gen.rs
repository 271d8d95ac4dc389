use crate::schema::{ColumnType, TableSchema, ALL_TABLES};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Boolean => "INTEGER",
        };

        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        columns.push(format!("    {} {}{}", col.name, sql_type, null_constraint));
    }

    if !schema.primary_key.is_empty() {
        columns.push(format!(
            "    PRIMARY KEY ({})",
            schema.primary_key.join(", ")
        ));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.columns.join(", "),
            fk.references_table,
            fk.references_columns.join(", ")
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX idx_{}_{} ON {}({})",
                schema.name,
                fk.columns.join("_"),
                schema.name,
                fk.columns.join(", ")
            )
        })
        .collect()
}

/// Generate the full default schema: every table plus its FK indexes, as
/// one script ready for `execute_batch`.
pub fn generate_schema() -> String {
    let mut statements = Vec::new();
    for table in ALL_TABLES {
        statements.push(generate_create_table(table));
        statements.extend(generate_indexes(table));
    }
    let mut script = statements.join(";\n\n");
    script.push_str(";\n");
    script
}
