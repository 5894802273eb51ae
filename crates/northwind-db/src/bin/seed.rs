//! # Seed Data Loader
//!
//! Loads the sample Northwind categories and products into a database file.
//!
//! ## Usage
//! ```bash
//! # Seed ./northwind.db (default)
//! cargo run -p northwind-db --bin seed
//!
//! # Specify database path
//! cargo run -p northwind-db --bin seed -- --db ./data/northwind.db
//! ```
//!
//! Nothing is written when the database already holds categories or products.

use std::env;

use northwind_db::seed::seed_sample_data;
use northwind_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./northwind.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Northwind Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./northwind.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("Northwind Seed Data Loader");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let start = std::time::Instant::now();
    let summary = seed_sample_data(&db).await?;

    if summary.skipped() {
        println!("⚠ Database already has data, nothing written.");
        println!("  Delete the database file to reseed.");
    } else {
        println!(
            "✓ Seeded {} categories and {} products in {:?}",
            summary.categories,
            summary.products,
            start.elapsed()
        );
    }

    db.close().await;
    Ok(())
}
