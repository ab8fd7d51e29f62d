//! The `mentorly plans` command.

use std::path::PathBuf;

use anyhow::Result;

use mentorly_core::format_price;
use mentorly_core::model::BillingCycle;

pub fn execute(cycle: String, currency: Option<String>, catalog: Option<PathBuf>) -> Result<()> {
    use comfy_table::{Cell, Table};

    let cycle: BillingCycle = cycle.parse().map_err(anyhow::Error::msg)?;
    let currency = match currency {
        Some(c) => c,
        None => mentorly_services::load_config()?.default_currency,
    };
    let resolver = super::load_resolver(catalog.as_ref())?;

    let mut table = Table::new();
    table.set_header(vec!["Plan", "Name", "Price", "Savings", "Features"]);

    for plan in resolver.plans_for_cycle(cycle) {
        let name = if plan.popular {
            format!("{} (most popular)", plan.name)
        } else {
            plan.name.clone()
        };
        let price = format!("{}/{}", format_price(plan.price, &currency)?, plan.interval);
        let savings = resolver.savings_text(plan, &currency)?.unwrap_or_default();

        table.add_row(vec![
            Cell::new(&plan.id),
            Cell::new(name),
            Cell::new(price),
            Cell::new(savings),
            Cell::new(plan.features.join("\n")),
        ]);
    }

    println!("{table}");
    Ok(())
}
