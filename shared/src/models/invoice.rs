//! Invoice Model

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::OrderLine;

/// Payment method accepted for an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(Self::Card),
            "CASH" => Ok(Self::Cash),
            other => Err(AppError::new(ErrorCode::InvalidPaymentMethod)
                .with_detail("payment_method", other)),
        }
    }
}

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            other => Err(AppError::new(ErrorCode::InvalidPaymentStatus)
                .with_detail("payment_status", other)),
        }
    }
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: String,
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub payment_due_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create invoice payload. Method and status arrive as text and are parsed
/// so that unsupported values map to their own error codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub order_id: String,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
}

/// Update invoice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
}

/// Payment-facing view of an invoice combined with its order summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub order_id: String,
    pub payment_status: PaymentStatus,
    pub payment_due: f64,
    pub table_number: Option<i64>,
    pub payment_due_date: i64,
    pub order_details: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_parses_known_values() {
        assert_eq!("CARD".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("CASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        let err = "cheque".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPaymentMethod);
    }

    #[test]
    fn payment_status_parses_known_values() {
        assert_eq!("PAID".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        let err = "pending".parse::<PaymentStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPaymentStatus);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn unset_payment_method_serializes_as_null() {
        let view = InvoiceView {
            invoice_id: "inv".into(),
            payment_method: None,
            order_id: "ord".into(),
            payment_status: PaymentStatus::Pending,
            payment_due: 0.0,
            table_number: None,
            payment_due_date: 0,
            order_details: vec![],
        };
        let json = serde_json::to_value(view).unwrap();
        assert!(json["payment_method"].is_null());
        assert_eq!(json["payment_status"], "PENDING");
    }
}
