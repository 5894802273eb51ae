//! Options 1 and 2: categories with their products.

use std::io::{BufRead, Write};

use northwind_core::validation::parse_whole_number;
use northwind_core::{Category, CategoryProductCount, CategoryStock, LoadStrategy, ProductFilter};

use prettytable::format::Alignment;
use prettytable::{Cell, Row};

use super::{number, titled_table, OutputFormat, Shell};
use crate::error::ShellResult;

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Option 1: categories and how many products they have.
    ///
    /// Eager loading, explicit loading with a question per category, or
    /// neither (every count reads zero).
    pub(super) async fn query_categories(&mut self) -> ShellResult<()> {
        self.io.say("Categories and how many products they have:")?;

        let counts = if self.io.confirm("Enable eager loading?")? {
            self.db
                .categories()
                .list_categories_with_product_counts(LoadStrategy::Eager, |_| false)
                .await?
        } else if self.io.confirm("Enable explicit loading?")? {
            self.explicit_counts().await?
        } else {
            self.db
                .categories()
                .list_categories_with_product_counts(LoadStrategy::Explicit, |_| false)
                .await?
        };

        self.emit_counts(&counts)
    }

    /// Asks about each category while the session is open.
    async fn explicit_counts(&mut self) -> ShellResult<Vec<CategoryProductCount>> {
        let mut session = self
            .db
            .categories()
            .open_session(LoadStrategy::Explicit, ProductFilter::all())
            .await?;

        let categories: Vec<Category> = session
            .categories()
            .iter()
            .map(|c| c.category.clone())
            .collect();

        for category in &categories {
            let question = format!("Explicitly load products for {}?", category.name);
            if self.io.confirm(&question)? {
                session.load_products(category.id).await?;
            }
        }

        Ok(session.product_counts())
    }

    fn emit_counts(&mut self, counts: &[CategoryProductCount]) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return self.emit_json(&counts);
        }

        let mut table = titled_table(&[("Category", Alignment::LEFT), ("Products", Alignment::RIGHT)]);
        for count in counts {
            table.add_row(Row::new(vec![
                Cell::new(&count.category_name),
                number(count.product_count),
            ]));
        }
        self.emit_table(&table)
    }

    /// Option 2: categories with only their well-stocked products.
    pub(super) async fn filtered_by_stock(&mut self) -> ShellResult<()> {
        let min_stock = self.io.ask_until("Enter a minimum for units in stock: ", |s| {
            parse_whole_number(s, "units in stock")
        })?;

        let listing = self
            .db
            .categories()
            .list_categories_filtered_by_stock(min_stock)
            .await?;

        self.emit_stock_listing(&listing, min_stock)
    }

    fn emit_stock_listing(&mut self, listing: &[CategoryStock], min_stock: i64) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return self.emit_json(&listing);
        }

        for category in listing {
            self.io.say(format_args!(
                "{} has {} products with a minimum of {} units in stock.",
                category.category_name, category.product_count, min_stock
            ))?;

            if category.products.is_empty() {
                continue;
            }

            let mut table = titled_table(&[
                ("Product", Alignment::LEFT),
                ("Units in stock", Alignment::RIGHT),
            ]);
            for product in &category.products {
                table.add_row(Row::new(vec![
                    Cell::new(&product.product_name),
                    number(product.units_in_stock),
                ]));
            }
            for line in table.to_string().lines() {
                self.io.say(format_args!("  {line}"))?;
            }
        }

        Ok(())
    }
}
