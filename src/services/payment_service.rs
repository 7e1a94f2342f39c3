// src/services/payment_service.rs

use std::time::Duration;

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Deserialize;

use crate::common::error::AppError;

// Resposta mínima da criação de PaymentIntent
#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Cliente do provedor de pagamentos. Só cria a intenção; a captura fica no provedor.
#[derive(Clone)]
pub struct PaymentService {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl PaymentService {
    pub fn new(api_base: String, secret_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        })
    }

    /// Cria a intenção de pagamento em USD (cartão) e devolve o client secret.
    pub async fn create_payment_intent(&self, price: Decimal) -> Result<String, AppError> {
        let amount = amount_in_cents(price)
            .ok_or_else(|| AppError::BadRequest("price is out of range".to_string()))?;

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", "usd".to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::PaymentError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or_else(|| status.to_string());
            return Err(AppError::PaymentError(detail));
        }

        let intent = response
            .json::<StripePaymentIntent>()
            .await
            .map_err(|e| AppError::PaymentError(e.to_string()))?;

        tracing::info!("PaymentIntent criado: {} centavos", amount);
        intent
            .client_secret
            .ok_or_else(|| AppError::PaymentError("missing client_secret".to_string()))
    }
}

/// Preço em dólares -> centavos, truncando frações de centavo.
/// Valores que estouram o Decimal ou o i64 não têm valor em centavos.
pub fn amount_in_cents(price: Decimal) -> Option<i64> {
    let cents = price.checked_mul(Decimal::from(100))?.trunc().to_i64()?;
    (cents > 0).then_some(cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::package::PaymentIntentPayload;
    use std::str::FromStr;
    use validator::Validate;

    #[test]
    fn whole_prices_become_cents() {
        assert_eq!(amount_in_cents(Decimal::from(8)), Some(800));
        assert_eq!(amount_in_cents(Decimal::from(15)), Some(1500));
    }

    #[test]
    fn fractional_cents_are_truncated() {
        assert_eq!(amount_in_cents(Decimal::from_str("15.999").unwrap()), Some(1599));
        assert_eq!(amount_in_cents(Decimal::from_str("0.5").unwrap()), Some(50));
    }

    #[test]
    fn non_positive_prices_have_no_amount() {
        assert_eq!(amount_in_cents(Decimal::ZERO), None);
        assert_eq!(amount_in_cents(Decimal::from_str("0.001").unwrap()), None);
        assert_eq!(amount_in_cents(Decimal::from(-5)), None);
    }

    #[test]
    fn huge_prices_have_no_amount() {
        let payload: PaymentIntentPayload = serde_json::from_str(r#"{"price": 1e28}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(amount_in_cents(payload.price), None);
        assert_eq!(amount_in_cents(Decimal::MAX), None);
        // Cabe no Decimal, mas não em i64
        assert_eq!(amount_in_cents(Decimal::from(i64::MAX)), None);
    }
}
