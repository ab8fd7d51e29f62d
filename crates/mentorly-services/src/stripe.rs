//! Payment gateway backed by the platform's Stripe checkout backend.
//!
//! The browser-side publishable key only gates whether live payments are
//! enabled; the backend endpoints hold the secret key and talk to Stripe.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mentorly_core::traits::{
    CheckoutRequest, PaymentGateway, PaymentRequest, PaymentSession, SessionStatus,
    SubscriptionState, SubscriptionStatus,
};

use crate::error::ServiceError;
use crate::http::{self, key_is_usable};

/// Payment gateway that calls the checkout backend over HTTP.
pub struct StripeGateway {
    backend_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl StripeGateway {
    /// Fails with `NotConfigured` unless `publishable_key` is a real key.
    pub fn new(
        publishable_key: &str,
        backend_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, ServiceError> {
        if !key_is_usable(publishable_key) {
            return Err(ServiceError::not_configured(
                "stripe",
                "missing or placeholder publishable key",
            ));
        }

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client: http::build_client(timeout_secs)?,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.backend_url, endpoint)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutBody<'a> {
    price_id: &'a str,
    success_url: &'a str,
    cancel_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_email: Option<&'a str>,
    mode: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentBody<'a> {
    /// Minor units.
    amount: u64,
    currency: &'a str,
    description: &'a str,
    success_url: &'a str,
    cancel_url: &'a str,
    mode: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody<'a> {
    price_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PortalBody<'a> {
    customer_id: &'a str,
    return_url: &'a str,
}

#[derive(Deserialize)]
struct SessionResponse {
    id: String,
    url: String,
}

#[derive(Deserialize)]
struct PortalResponse {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    is_active: bool,
    plan: String,
    status: SubscriptionState,
    current_period_end: DateTime<Utc>,
    #[serde(default)]
    cancel_at_period_end: bool,
}

impl StripeGateway {
    async fn start_session<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<PaymentSession, ServiceError> {
        let response = http::send(
            self.client.post(self.url(endpoint)).json(body),
            self.timeout_secs,
            endpoint,
        )
        .await?;
        let session: SessionResponse = http::json(response).await?;

        Ok(PaymentSession {
            session_id: session.id,
            url: session.url,
            status: SessionStatus::Pending,
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn name(&self) -> &str {
        "stripe"
    }

    #[instrument(skip(self, request), fields(price_id = %request.price_id))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> anyhow::Result<PaymentSession> {
        let body = CheckoutBody {
            price_id: &request.price_id,
            success_url: &request.success_url,
            cancel_url: &request.cancel_url,
            customer_email: request.customer_email.as_deref(),
            mode: "subscription",
        };
        Ok(self
            .start_session("/api/create-checkout-session", &body)
            .await?)
    }

    #[instrument(skip(self, request), fields(amount = request.amount, currency = %request.currency))]
    async fn create_payment_session(
        &self,
        request: &PaymentRequest,
    ) -> anyhow::Result<PaymentSession> {
        let Some(amount) = request.amount_minor_units() else {
            anyhow::bail!("invalid payment amount: {}", request.amount);
        };
        let currency = request.currency.to_ascii_lowercase();
        let body = PaymentBody {
            amount,
            currency: &currency,
            description: &request.description,
            success_url: &request.success_url,
            cancel_url: &request.cancel_url,
            mode: "payment",
        };
        Ok(self
            .start_session("/api/create-payment-session", &body)
            .await?)
    }

    #[instrument(skip(self))]
    async fn subscription_status(&self, customer_id: &str) -> anyhow::Result<SubscriptionStatus> {
        let endpoint = format!("/api/subscription-status/{customer_id}");
        let response =
            http::send(self.client.get(self.url(&endpoint)), self.timeout_secs, &endpoint).await?;
        let status: StatusResponse = http::json(response).await?;

        Ok(SubscriptionStatus {
            is_active: status.is_active,
            plan: status.plan,
            status: status.status,
            current_period_end: status.current_period_end,
            cancel_at_period_end: status.cancel_at_period_end,
        })
    }

    #[instrument(skip(self))]
    async fn cancel_subscription(&self, subscription_id: &str) -> anyhow::Result<()> {
        let endpoint = format!("/api/cancel-subscription/{subscription_id}");
        http::send(self.client.post(self.url(&endpoint)), self.timeout_secs, &endpoint).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_subscription(
        &self,
        subscription_id: &str,
        new_price_id: &str,
    ) -> anyhow::Result<()> {
        let endpoint = format!("/api/update-subscription/{subscription_id}");
        let body = UpdateBody {
            price_id: new_price_id,
        };
        http::send(
            self.client.post(self.url(&endpoint)).json(&body),
            self.timeout_secs,
            &endpoint,
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> anyhow::Result<String> {
        let endpoint = "/api/create-portal-session";
        let body = PortalBody {
            customer_id,
            return_url,
        };
        let response = http::send(
            self.client.post(self.url(endpoint)).json(&body),
            self.timeout_secs,
            endpoint,
        )
        .await?;
        let portal: PortalResponse = http::json(response).await?;
        Ok(portal.url)
    }
}
