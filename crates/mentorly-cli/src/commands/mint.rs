//! The `mentorly mint` command.

use std::path::PathBuf;

use anyhow::Result;

use mentorly_core::history::AttemptHistory;
use mentorly_core::traits::{share_text, MintRequest};
use mentorly_services::{create_badge_minter, load_config_from};

pub async fn execute(
    course: String,
    recipient: String,
    history: PathBuf,
    badge: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let minter = create_badge_minter(&config.badges);

    let history = AttemptHistory::load_or_default(&history)?;
    let mut course = super::load_course(&course)?;
    course.restore(&history);

    let mut request = MintRequest::for_course(&course, &recipient);
    if let Some(badge) = badge {
        request.badge_name = badge;
    }

    eprintln!("Minting \"{}\"...", request.badge_name);
    let receipt = minter.mint(&request).await?;

    println!("Minted \"{}\" for {}", request.badge_name, request.recipient);
    println!("  Asset:       {}", receipt.asset_id);
    println!("  Transaction: {}", receipt.transaction_id);
    println!("  Explorer:    {}", receipt.explorer_url);
    println!("\n{}", share_text(&request.badge_name));

    Ok(())
}
