//! Options 3 and 4: product queries.

use std::io::{BufRead, Write};

use northwind_core::validation::{parse_money, validate_search_text};

use prettytable::format::Alignment;
use prettytable::{Cell, Row};

use super::{number, titled_table, yes_no, OutputFormat, Shell};
use crate::error::ShellResult;

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Option 3: products costing more than a price, highest first.
    pub(super) async fn products_above_cost(&mut self) -> ShellResult<()> {
        self.io
            .say("Products that cost more than a price, highest at top.")?;

        let price = self
            .io
            .ask_until("Enter a product price: ", |s| parse_money(s, "price"))?;

        let products = self.db.products().list_products_above_cost(price).await?;
        self.emit_products(&products)
    }

    /// Option 4: products whose name contains the given text.
    pub(super) async fn search_products(&mut self) -> ShellResult<()> {
        let part = self
            .io
            .ask_until("Enter part of a product name: ", validate_search_text)?;

        let hits = self
            .db
            .products()
            .search_products_by_name_part(&part)
            .await?;

        if self.format == OutputFormat::Json {
            return self.emit_json(&hits);
        }

        let mut table = titled_table(&[
            ("Product", Alignment::LEFT),
            ("Units in stock", Alignment::RIGHT),
            ("Discontinued", Alignment::LEFT),
        ]);
        for hit in &hits {
            table.add_row(Row::new(vec![
                Cell::new(&hit.name),
                number(hit.units_in_stock),
                Cell::new(yes_no(hit.discontinued)),
            ]));
        }
        self.emit_table(&table)
    }
}
