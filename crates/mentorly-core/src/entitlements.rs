//! Subscription entitlements and price display.
//!
//! The resolver answers "does plan P unlock feature T?" from a feature matrix
//! handed to it at construction. Unknown plans unlock nothing.

use crate::error::EntitlementError;
use crate::model::{BillingCycle, BillingInterval, FeatureMatrix, SubscriptionPlan};

/// Resolves feature access and display pricing for a plan catalog.
#[derive(Debug, Clone)]
pub struct EntitlementResolver {
    plans: Vec<SubscriptionPlan>,
    matrix: FeatureMatrix,
}

impl EntitlementResolver {
    pub fn new(plans: Vec<SubscriptionPlan>, matrix: FeatureMatrix) -> Self {
        Self { plans, matrix }
    }

    /// Whether `plan_id` grants `feature_token`.
    pub fn has_access(&self, plan_id: &str, feature_token: &str) -> bool {
        let granted = self
            .matrix
            .tokens(plan_id)
            .is_some_and(|tokens| tokens.contains(feature_token));

        if !self.matrix.contains_plan(plan_id) {
            tracing::debug!(plan = plan_id, "plan has no feature entry, access denied");
        }
        granted
    }

    pub fn plans(&self) -> &[SubscriptionPlan] {
        &self.plans
    }

    pub fn plan(&self, plan_id: &str) -> Option<&SubscriptionPlan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }

    pub fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }

    /// Plans to show for a billing cycle, in catalog order.
    ///
    /// Yearly shows a plan's yearly variant when one exists and falls back to
    /// the monthly plan otherwise (e.g. a free tier).
    pub fn plans_for_cycle(&self, cycle: BillingCycle) -> Vec<&SubscriptionPlan> {
        self.plans
            .iter()
            .filter(|plan| match cycle {
                BillingCycle::Monthly => plan.interval == BillingInterval::Month,
                BillingCycle::Yearly => {
                    let has_yearly = self
                        .plans
                        .iter()
                        .any(|p| p.name == plan.name && p.interval == BillingInterval::Year);
                    if has_yearly {
                        plan.interval == BillingInterval::Year
                    } else {
                        plan.interval == BillingInterval::Month
                    }
                }
            })
            .collect()
    }

    /// "Save N% ($X per year)" for a yearly plan with a monthly sibling.
    pub fn savings_text(
        &self,
        plan: &SubscriptionPlan,
        currency: &str,
    ) -> Result<Option<String>, EntitlementError> {
        if plan.interval != BillingInterval::Year {
            return Ok(None);
        }
        let Some(monthly) = self
            .plans
            .iter()
            .find(|p| p.name == plan.name && p.interval == BillingInterval::Month)
        else {
            return Ok(None);
        };

        let twelve_months = monthly.price * 12.0;
        if twelve_months <= 0.0 {
            return Ok(None);
        }
        let saved = twelve_months - plan.price;
        let percent = (saved / twelve_months * 100.0).round();

        Ok(Some(format!(
            "Save {percent}% ({} per year)",
            format_price(saved, currency)?
        )))
    }
}

/// Format an amount in major units as an en-US currency string with two
/// decimals, e.g. `format_price(29.0, "USD") == "$29.00"`.
pub fn format_price(amount: f64, currency: &str) -> Result<String, EntitlementError> {
    let code = currency_code(currency)?;
    if !amount.is_finite() {
        return Err(EntitlementError::InvalidAmount(amount.to_string()));
    }

    let scaled = (amount.abs() * 100.0).round();
    if scaled >= u64::MAX as f64 {
        return Err(EntitlementError::InvalidAmount(amount.to_string()));
    }
    let cents = scaled as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;

    Ok(match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{whole}.{fraction:02}"),
        None => format!("{sign}{code} {whole}.{fraction:02}"),
    })
}

/// Read back a string produced by [`format_price`].
pub fn parse_price(text: &str, currency: &str) -> Result<f64, EntitlementError> {
    let code = currency_code(currency)?;
    let unparseable = || EntitlementError::UnparseablePrice(text.to_string());

    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits = match currency_symbol(&code) {
        Some(symbol) => rest.strip_prefix(symbol),
        None => rest.strip_prefix(code.as_str()).map(str::trim_start),
    }
    .ok_or_else(unparseable)?;

    let amount: f64 = digits
        .replace(',', "")
        .parse()
        .map_err(|_| unparseable())?;

    Ok(if negative { -amount } else { amount })
}

fn currency_code(currency: &str) -> Result<String, EntitlementError> {
    let code = currency.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(EntitlementError::InvalidCurrency(currency.to_string()))
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}
