//! The `mentorly checkout` command.

use std::path::PathBuf;

use anyhow::Result;

use mentorly_core::catalog::default_plans;
use mentorly_core::traits::CheckoutRequest;
use mentorly_services::{create_payment_gateway, load_config_from};

pub async fn execute(plan_id: String, email: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;

    let plans = default_plans();
    let plan = plans
        .iter()
        .find(|p| p.id == plan_id)
        .ok_or_else(|| anyhow::anyhow!("unknown plan: {plan_id}"))?;

    if plan.is_free() {
        println!("{} is free; no checkout needed.", plan.name);
        return Ok(());
    }

    let gateway = create_payment_gateway(&config.payments, config.timeout_secs)?;
    let request = CheckoutRequest {
        price_id: plan.price_id.clone(),
        success_url: config.payments.success_url.clone(),
        cancel_url: config.payments.cancel_url.clone(),
        customer_email: email,
    };

    let session = gateway.create_checkout_session(&request).await?;

    println!("Checkout for {} via {}", plan.name, gateway.name());
    println!("  Session: {}", session.session_id);
    println!("  URL:     {}", session.url);

    Ok(())
}
