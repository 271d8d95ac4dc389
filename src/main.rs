use anyhow::Result;
use starfield_to_sqlite::{
    cli::{Cli, Commands},
    index::{DuplicatePolicy, ResourceIndex},
    model::{self, DB_FILE, GALAXY_FILE},
    normalize::restructure,
    report::ConsoleReport,
    schema::table_names,
    writer::create_db,
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let mut report = ConsoleReport::new();

    match cli.command {
        Commands::Restructure { data_dir } => {
            let start = Instant::now();
            let body_count = restructure(&data_dir, &mut report)?;
            println!(
                "\nWrote {} ({} bodies) in {:.1}s",
                GALAXY_FILE,
                body_count,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::CreateDb {
            data_dir,
            schema,
            on_duplicate,
        } => {
            let start = Instant::now();
            let row_count = create_db(&data_dir, schema.as_deref(), on_duplicate, &mut report)?;
            println!(
                "\nCreated {} ({} rows) in {:.1}s",
                DB_FILE,
                row_count,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Sync {
            data_dir,
            schema,
            on_duplicate,
        } => {
            let start = Instant::now();
            let body_count = restructure(&data_dir, &mut report)?;
            println!("Wrote {} ({} bodies)", GALAXY_FILE, body_count);

            println!("\nLoading into SQLite...");
            let row_count = create_db(&data_dir, schema.as_deref(), on_duplicate, &mut report)?;
            println!(
                "\nCreated {} ({} rows) in {:.1}s",
                DB_FILE,
                row_count,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::ListTables => {
            println!("Database tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }

        Commands::Resolve { data_dir, name } => {
            let catalog = model::load_resources(&data_dir)?;
            let index = ResourceIndex::build(&catalog, DuplicatePolicy::Reject)?;
            println!("{} ({})", index.resolve(&name)?, index.short_name(&name)?);
        }
    }

    Ok(())
}
