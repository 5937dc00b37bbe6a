//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ErrorCode;
use shared::models::{
    Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView, PaymentMethod, PaymentStatus,
};

use crate::core::ServerState;
use crate::db::repository::invoice::NewInvoice;
use crate::invoices::assemble_invoice_view;
use crate::orders::OrderAggregator;
use crate::utils::{AppError, AppResult};

/// GET /invoices
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = state.repos.invoices.find_all().await?;
    Ok(Json(invoices))
}

/// GET /invoices/{invoice_id} - payment view with the order's lines
pub async fn view(
    State(state): State<ServerState>,
    Path(invoice_id): Path<String>,
) -> AppResult<Json<InvoiceView>> {
    let invoice = state
        .repos
        .invoices
        .find_by_id(&invoice_id)
        .await?
        .ok_or_else(|| invoice_not_found(&invoice_id))?;

    let aggregator = OrderAggregator::new(state.repos.order_items.clone());
    let summaries = aggregator.items_by_order(&invoice.order_id).await?;
    Ok(Json(assemble_invoice_view(invoice, summaries)?))
}

/// POST /invoices - status defaults to PENDING, due one day from now
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<Invoice>> {
    let payment_method = parse_method(payload.payment_method.as_deref())?;
    let payment_status = parse_status(payload.payment_status.as_deref())?.unwrap_or_default();

    if state.repos.orders.find_by_id(&payload.order_id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::OrderNotFound,
            format!("Order {} not found", payload.order_id),
        )
        .with_detail("order_id", payload.order_id));
    }

    let invoice = state
        .repos
        .invoices
        .create(NewInvoice {
            order_id: payload.order_id,
            payment_method,
            payment_status,
        })
        .await?;
    tracing::info!(invoice_id = %invoice.id, order_id = %invoice.order_id, "Invoice created");
    Ok(Json(invoice))
}

/// PATCH /invoices/{invoice_id} - payment method and status only
pub async fn update(
    State(state): State<ServerState>,
    Path(invoice_id): Path<String>,
    Json(payload): Json<InvoiceUpdate>,
) -> AppResult<Json<Invoice>> {
    let payment_method = parse_method(payload.payment_method.as_deref())?;
    let payment_status = parse_status(payload.payment_status.as_deref())?;

    let invoice = state
        .repos
        .invoices
        .update(&invoice_id, payment_method, payment_status)
        .await
        .map_err(|e| e.into_app(ErrorCode::InvoiceNotFound))?;
    Ok(Json(invoice))
}

/// DELETE /invoices/{invoice_id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(invoice_id): Path<String>,
) -> AppResult<Json<bool>> {
    if !state.repos.invoices.delete(&invoice_id).await? {
        return Err(invoice_not_found(&invoice_id));
    }
    Ok(Json(true))
}

fn parse_method(raw: Option<&str>) -> AppResult<Option<PaymentMethod>> {
    raw.map(str::parse).transpose()
}

fn parse_status(raw: Option<&str>) -> AppResult<Option<PaymentStatus>> {
    raw.map(str::parse).transpose()
}

fn invoice_not_found(invoice_id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::InvoiceNotFound,
        format!("Invoice {} not found", invoice_id),
    )
}
