//! Options 5 to 7: product mutations.
//!
//! Each one reports its outcome, then prints the full product listing.

use std::io::{BufRead, Write};

use northwind_core::validation::{
    parse_optional_money, parse_positive_money, parse_whole_number, validate_name_prefix,
    validate_product_name,
};
use northwind_core::NewProduct;
use serde_json::json;

use super::{OutputFormat, Shell};
use crate::error::ShellResult;

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Option 5: add a product.
    pub(super) async fn add_product(&mut self) -> ShellResult<()> {
        let category_id = self
            .io
            .ask_until("Category id: ", |s| parse_whole_number(s, "category id"))?;
        let name = self
            .io
            .ask_until("Product name: ", validate_product_name)?;
        let cost = self
            .io
            .ask_until("Cost (blank for none): ", |s| parse_optional_money(s, "cost"))?;
        let units = self
            .io
            .ask_until("Units in stock: ", |s| parse_whole_number(s, "units in stock"))?;
        let discontinued = self.io.confirm("Discontinued?")?;

        let product = NewProduct::new(category_id, name, cost)
            .units_in_stock(units)
            .discontinued(discontinued);

        let added = self.db.products().add_product(&product).await?;

        match self.format {
            OutputFormat::Json => self.emit_json(&added)?,
            OutputFormat::Table if added.succeeded() => self.io.say(format_args!(
                "Added product {} with id {}.",
                product.name, added.product_id
            ))?,
            OutputFormat::Table => self.io.say("No product was added.")?,
        }

        self.emit_all_products().await
    }

    /// Option 6: raise the cost of the first product matching a prefix.
    pub(super) async fn increase_price(&mut self) -> ShellResult<()> {
        let prefix = self
            .io
            .ask_until("Product name starts with: ", validate_name_prefix)?;
        let amount = self
            .io
            .ask_until("Increase by: ", |s| parse_positive_money(s, "amount"))?;

        let increased = self
            .db
            .products()
            .increase_price_by_name_prefix(&prefix, amount)
            .await?;

        match self.format {
            OutputFormat::Json => self.emit_json(&increased)?,
            OutputFormat::Table => {
                let old = increased
                    .old_cost
                    .map_or_else(|| "no cost".to_string(), |c| c.to_string());
                self.io.say(format_args!(
                    "{} (id {}) now costs {} (was {}).",
                    increased.product_name, increased.product_id, increased.new_cost, old
                ))?;
            }
        }

        self.emit_all_products().await
    }

    /// Option 7: delete every product matching a prefix.
    pub(super) async fn delete_products(&mut self) -> ShellResult<()> {
        let prefix = self
            .io
            .ask_until("Delete products whose name starts with: ", validate_name_prefix)?;

        let deleted = self
            .db
            .products()
            .delete_products_by_name_prefix(&prefix)
            .await?;

        match self.format {
            OutputFormat::Json => self.emit_json(&json!({ "prefix": prefix, "deleted": deleted }))?,
            OutputFormat::Table => self
                .io
                .say(format_args!("{deleted} product(s) deleted."))?,
        }

        self.emit_all_products().await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{run_script, seeded_db};
    use super::*;
    use northwind_core::Money;

    #[tokio::test]
    async fn test_add_product_then_listing() {
        let db = seeded_db().await;
        let before = db.products().count().await.unwrap();

        let script = "5\n1\nMatcha\n12.50\n40\nn\n0\n";
        let out = run_script(&db, OutputFormat::Table, script).await;

        assert!(out.contains("Added product Matcha with id 78."));
        assert!(out.contains("All products, highest cost at top:"));
        assert_eq!(db.products().count().await.unwrap(), before + 1);

        let matcha = db.products().get_by_id(78).await.unwrap().unwrap();
        assert_eq!(matcha.cost, Some(Money::from_cents(1250)));
    }

    #[tokio::test]
    async fn test_add_product_unknown_category_reports_constraint() {
        let db = seeded_db().await;
        let before = db.products().count().await.unwrap();

        let script = "5\n999\nGhost\n\n0\nn\n0\n";
        let out = run_script(&db, OutputFormat::Table, script).await;

        assert!(out.contains("Error [CONSTRAINT_VIOLATION]"));
        assert!(!out.contains("All products"));
        assert_eq!(db.products().count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_increase_price_rejects_non_positive_amount() {
        let db = seeded_db().await;

        let script = "6\nChai\n0\n1.50\n0\n";
        let out = run_script(&db, OutputFormat::Table, script).await;

        assert!(out.contains("amount must be positive"));
        assert!(out.contains("Chai (id 1) now costs $19.50 (was $18.00)."));
    }

    #[tokio::test]
    async fn test_delete_products_json() {
        let db = seeded_db().await;

        let out = run_script(&db, OutputFormat::Json, "7\nLouisiana\n0\n").await;
        assert!(out.contains("\"deleted\": 2"));
        assert_eq!(db.products().count().await.unwrap(), 75);
    }
}
