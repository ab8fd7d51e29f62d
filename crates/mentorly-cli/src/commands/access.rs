//! The `mentorly access` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(plan: String, feature: String, catalog: Option<PathBuf>) -> Result<()> {
    let resolver = super::load_resolver(catalog.as_ref())?;

    if resolver.has_access(&plan, &feature) {
        println!("{plan}: {feature} granted");
    } else {
        if resolver.plan(&plan).is_none() {
            println!("Unknown plan {plan}; unknown plans unlock nothing.");
        }
        println!("{plan}: {feature} denied");
    }

    Ok(())
}
