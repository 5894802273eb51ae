//! # Shell Commands
//!
//! The menu loop and one handler per menu option.
//!
//! ## Menu
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Option   Handler                        Facade call                    │
//! │  ──────   ─────────────────────────────  ─────────────────────────────  │
//! │  1        categories::query_categories   open_session / product counts  │
//! │  2        categories::filtered_by_stock  list_categories_filtered_...   │
//! │  3        products::above_cost           list_products_above_cost       │
//! │  4        products::search               search_products_by_name_part   │
//! │  5        mutations::add_product         add_product                    │
//! │  6        mutations::increase_price      increase_price_by_name_prefix  │
//! │  7        mutations::delete_products     delete_products_by_name_prefix │
//! │  0 / q    quit                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed option prints its error and returns to the menu. Every mutation
//! is followed by the full product listing.

mod categories;
mod mutations;
mod products;

use std::io::{BufRead, Write};

use northwind_core::{Product, ValidationError};
use northwind_db::Database;
use prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE;
use prettytable::format::Alignment;
use prettytable::{Cell, Row, Table};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ShellResult;
use crate::prompt::Prompter;

/// How query results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    QueryCategories,
    FilteredByStock,
    ProductsAboveCost,
    SearchProducts,
    AddProduct,
    IncreasePrice,
    DeleteProducts,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let choice = match input.trim().to_ascii_lowercase().as_str() {
            "1" => MenuChoice::QueryCategories,
            "2" => MenuChoice::FilteredByStock,
            "3" => MenuChoice::ProductsAboveCost,
            "4" => MenuChoice::SearchProducts,
            "5" => MenuChoice::AddProduct,
            "6" => MenuChoice::IncreasePrice,
            "7" => MenuChoice::DeleteProducts,
            "0" | "q" | "quit" => MenuChoice::Quit,
            _ => {
                return Err(ValidationError::NotAllowed {
                    field: "option".to_string(),
                    allowed: ["1", "2", "3", "4", "5", "6", "7", "0"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                })
            }
        };
        Ok(choice)
    }
}

const MENU: &str = "\
Northwind
  1  Categories and how many products they have
  2  Categories with a minimum of units in stock
  3  Products that cost more than a price
  4  Search products by part of the name
  5  Add a product
  6  Increase the price of a product
  7  Delete products by name prefix
  0  Quit";

/// The interactive shell.
pub struct Shell<R, W> {
    db: Database,
    io: Prompter<R, W>,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(db: Database, io: Prompter<R, W>, format: OutputFormat) -> Self {
        Shell { db, io, format }
    }

    /// Runs the menu until the operator quits or input ends.
    pub async fn run(&mut self) -> ShellResult<()> {
        loop {
            self.io.say("")?;
            self.io.say(MENU)?;

            let choice = match self.io.ask_until("Choose an option: ", MenuChoice::parse) {
                Ok(choice) => choice,
                Err(err) if err.is_end_of_input() => break,
                Err(err) => return Err(err),
            };

            if choice == MenuChoice::Quit {
                break;
            }

            info!(?choice, "Running menu option");

            if let Err(err) = self.dispatch(choice).await {
                if err.is_end_of_input() {
                    break;
                }
                warn!(code = %err.code, message = %err.message, "Menu option failed");
                match self.format {
                    OutputFormat::Table => self.io.say(format_args!("Error {err}"))?,
                    OutputFormat::Json => self.emit_json(&err)?,
                }
            }
        }

        info!("Shell finished");
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> ShellResult<()> {
        match choice {
            MenuChoice::QueryCategories => self.query_categories().await,
            MenuChoice::FilteredByStock => self.filtered_by_stock().await,
            MenuChoice::ProductsAboveCost => self.products_above_cost().await,
            MenuChoice::SearchProducts => self.search_products().await,
            MenuChoice::AddProduct => self.add_product().await,
            MenuChoice::IncreasePrice => self.increase_price().await,
            MenuChoice::DeleteProducts => self.delete_products().await,
            MenuChoice::Quit => Ok(()),
        }
    }

    fn emit_json<T: Serialize>(&mut self, value: &T) -> ShellResult<()> {
        let rendered = serde_json::to_string_pretty(value)?;
        self.io.say(rendered)
    }

    fn emit_table(&mut self, table: &Table) -> ShellResult<()> {
        if table.len() == 0 {
            return self.io.say("(no rows)");
        }
        self.io.say(table.to_string().trim_end())
    }

    /// Prints products as a table or JSON.
    fn emit_products(&mut self, products: &[Product]) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return self.emit_json(&products);
        }

        let mut table = titled_table(&[
            ("ID", Alignment::RIGHT),
            ("Product", Alignment::LEFT),
            ("Cost", Alignment::RIGHT),
            ("Stock", Alignment::RIGHT),
            ("Discontinued", Alignment::LEFT),
        ]);

        for p in products {
            let cost = p.cost.map_or_else(|| "-".to_string(), |c| c.to_string());
            table.add_row(Row::new(vec![
                number(p.id),
                Cell::new(&p.name),
                Cell::new_align(&cost, Alignment::RIGHT),
                number(p.units_in_stock),
                Cell::new(yes_no(p.discontinued)),
            ]));
        }

        self.emit_table(&table)
    }

    /// The full listing printed after every mutation.
    async fn emit_all_products(&mut self) -> ShellResult<()> {
        let products = self.db.products().list_all_products_by_cost_descending().await?;
        if self.format == OutputFormat::Table {
            self.io.say("")?;
            self.io.say("All products, highest cost at top:")?;
        }
        self.emit_products(&products)
    }
}

/// An empty table with one title per column, aligned like its values.
fn titled_table(columns: &[(&str, Alignment)]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        columns
            .iter()
            .map(|&(title, align)| Cell::new_align(title, align))
            .collect(),
    ));
    table
}

/// A right-aligned numeric cell.
fn number(value: impl ToString) -> Cell {
    Cell::new_align(&value.to_string(), Alignment::RIGHT)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use northwind_db::seed::seed_sample_data;
    use northwind_db::{Database, DbConfig};

    use super::*;

    pub async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_sample_data(&db).await.unwrap();
        db
    }

    /// Runs the shell over scripted input and returns everything it printed.
    pub async fn run_script(db: &Database, format: OutputFormat, script: &str) -> String {
        let io = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut shell = Shell::new(db.clone(), io, format);
        shell.run().await.unwrap();
        String::from_utf8(shell.io.into_output()).unwrap()
    }

    /// Trimmed cells of the first table line whose first cell is `first`.
    pub fn table_row(out: &str, first: &str) -> Vec<String> {
        out.lines()
            .filter_map(|line| line.trim().strip_prefix('|')?.strip_suffix('|'))
            .map(|inner| inner.split('|').map(|c| c.trim().to_string()).collect::<Vec<_>>())
            .find(|cells| cells.first().map(String::as_str) == Some(first))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{run_script, seeded_db};
    use super::*;

    #[test]
    fn test_titled_table_aligns_numbers_right() {
        let mut table = titled_table(&[("Product", Alignment::LEFT), ("Stock", Alignment::RIGHT)]);
        table.add_row(Row::new(vec![Cell::new("Chai"), number(39)]));

        let rendered = table.to_string();
        assert!(rendered.contains("| Chai    |    39 |"));
        assert!(rendered.contains("| Product | Stock |"));
        assert_eq!(test_support::table_row(&rendered, "Chai"), ["Chai", "39"]);
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 3 ").unwrap(), MenuChoice::ProductsAboveCost);
        assert_eq!(MenuChoice::parse("Q").unwrap(), MenuChoice::Quit);
        assert_eq!(MenuChoice::parse("0").unwrap(), MenuChoice::Quit);
        assert!(MenuChoice::parse("8").is_err());
        assert!(MenuChoice::parse("").is_err());
    }

    #[tokio::test]
    async fn test_quit_and_end_of_input_stop_cleanly() {
        let db = seeded_db().await;

        let quit = run_script(&db, OutputFormat::Table, "q\n").await;
        assert_eq!(quit.matches("Choose an option: ").count(), 1);

        let eof = run_script(&db, OutputFormat::Table, "").await;
        assert!(eof.contains("Choose an option: "));
    }

    #[tokio::test]
    async fn test_unknown_option_reprompts() {
        let db = seeded_db().await;

        let out = run_script(&db, OutputFormat::Table, "9\n0\n").await;
        assert!(out.contains("option must be one of"));
        assert_eq!(out.matches("Choose an option: ").count(), 2);
    }

    #[tokio::test]
    async fn test_failed_option_returns_to_menu() {
        let db = seeded_db().await;

        let out = run_script(&db, OutputFormat::Table, "6\nWidget\n5.00\n0\n").await;
        assert!(out.contains("Error [NOT_FOUND]"));
        assert_eq!(out.matches("Choose an option: ").count(), 2);
    }
}
