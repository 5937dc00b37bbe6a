//! Invoice assembler
//!
//! Combines a stored invoice with the aggregation of its order into the
//! payment-facing [`InvoiceView`].

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Invoice, InvoiceView, OrderSummary};

/// Build the payment view of `invoice` from its order's summaries.
///
/// An order without items has no summary; that is [`ErrorCode::OrderEmpty`].
pub fn assemble_invoice_view(
    invoice: Invoice,
    summaries: Vec<OrderSummary>,
) -> AppResult<InvoiceView> {
    let Some(summary) = summaries.into_iter().next() else {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            format!("Order {} has no items to invoice", invoice.order_id),
        )
        .with_detail("order_id", invoice.order_id));
    };

    Ok(InvoiceView {
        invoice_id: invoice.id,
        payment_method: invoice.payment_method,
        order_id: invoice.order_id,
        payment_status: invoice.payment_status,
        payment_due: summary.payment_due,
        table_number: summary.table_number,
        payment_due_date: invoice.payment_due_date,
        order_details: summary.order_items,
    })
}
