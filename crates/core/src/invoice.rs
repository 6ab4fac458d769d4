//! Invoice records and creation-time derivation.
//!
//! Monetary fields (`subtotal`, `discount`, `gst_rate`, `gst_amount`, `total`,
//! item `amount`s) are client-supplied and trusted as-is; the server never
//! recomputes or cross-checks them against the line items. The only derived
//! fields are `status` and `amount_paid`, fixed at creation from the payment
//! type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// How the invoice is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Credit,
}

/// Settlement state of an invoice.
///
/// `Partial` is part of the lifecycle vocabulary but is never produced by
/// creation-time derivation (no payment-update operation exists yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Partial,
}

/// Customer block embedded in an invoice. Identity is the exact `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// One line item. `amount` is expected to equal `quantity * rate` but is not
/// validated server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Client-submitted fields for invoice creation. Everything the server stamps
/// (id, number, dates, status, amount_paid) is absent by construction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub payment_type: PaymentType,
    #[serde(default)]
    pub customer: Option<Customer>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub gst_rate: f64,
    #[serde(default)]
    pub gst_amount: f64,
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// A fully stamped invoice record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: RecordId,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub payment_type: PaymentType,
    #[serde(default)]
    pub customer: Option<Customer>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub gst_rate: f64,
    #[serde(default)]
    pub gst_amount: f64,
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub amount_paid: f64,
}

impl Invoice {
    /// Stamp a new invoice from client-submitted fields.
    ///
    /// `invoice_date` is the server's calendar date (UTC); status and
    /// amount_paid derive from the payment type: Cash settles immediately,
    /// Credit starts unpaid.
    pub fn issue(new: NewInvoice, invoice_number: String, now: DateTime<Utc>) -> Self {
        let (status, amount_paid) = match new.payment_type {
            PaymentType::Cash => (InvoiceStatus::Paid, new.total),
            PaymentType::Credit => (InvoiceStatus::Unpaid, 0.0),
        };

        Self {
            id: RecordId::new(),
            invoice_number,
            invoice_date: now.date_naive(),
            due_date: new.due_date,
            payment_type: new.payment_type,
            customer: new.customer,
            items: new.items,
            subtotal: new.subtotal,
            discount: new.discount,
            gst_rate: new.gst_rate,
            gst_amount: new.gst_amount,
            total: new.total,
            notes: new.notes,
            terms: new.terms,
            created_at: now,
            status,
            amount_paid,
        }
    }

    /// Unpaid balance on a credit invoice; zero once covered.
    pub fn outstanding(&self) -> f64 {
        match self.payment_type {
            PaymentType::Credit => self.total - self.amount_paid,
            PaymentType::Cash => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft(payment_type: PaymentType, total: f64) -> NewInvoice {
        NewInvoice {
            payment_type,
            customer: None,
            items: vec![InvoiceItem {
                description: "Widget".to_string(),
                quantity: 2.0,
                rate: 100.0,
                amount: 200.0,
            }],
            subtotal: total,
            discount: 0.0,
            gst_rate: 0.0,
            gst_amount: 0.0,
            total,
            notes: None,
            terms: None,
            due_date: None,
        }
    }

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap()
    }

    #[test]
    fn cash_invoice_is_paid_in_full_at_creation() {
        let inv = Invoice::issue(draft(PaymentType::Cash, 252.0), "INV/2026/03/001".into(), test_now());
        assert_eq!(inv.status, InvoiceStatus::Paid);
        assert_eq!(inv.amount_paid, 252.0);
        assert_eq!(inv.outstanding(), 0.0);
    }

    #[test]
    fn credit_invoice_starts_unpaid() {
        let inv = Invoice::issue(draft(PaymentType::Credit, 500.0), "INV/2026/03/002".into(), test_now());
        assert_eq!(inv.status, InvoiceStatus::Unpaid);
        assert_eq!(inv.amount_paid, 0.0);
        assert_eq!(inv.outstanding(), 500.0);
    }

    #[test]
    fn invoice_date_is_the_creation_calendar_date() {
        let inv = Invoice::issue(draft(PaymentType::Cash, 10.0), "INV/2026/03/003".into(), test_now());
        assert_eq!(inv.invoice_date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(inv.created_at, test_now());
    }

    #[test]
    fn client_supplied_due_date_and_customer_are_kept_verbatim() {
        let mut d = draft(PaymentType::Credit, 100.0);
        d.due_date = NaiveDate::from_ymd_opt(2026, 3, 21);
        d.customer = Some(Customer {
            name: "Acme Traders".to_string(),
            mobile: Some("9876543210".to_string()),
            address: None,
        });
        let inv = Invoice::issue(d, "INV/2026/03/004".into(), test_now());
        assert_eq!(inv.due_date, NaiveDate::from_ymd_opt(2026, 3, 21));
        assert_eq!(inv.customer.as_ref().unwrap().name, "Acme Traders");
        assert_eq!(inv.customer.as_ref().unwrap().mobile.as_deref(), Some("9876543210"));
    }

    #[test]
    fn payment_type_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&PaymentType::Cash).unwrap(), "\"Cash\"");
        assert_eq!(serde_json::to_string(&InvoiceStatus::Unpaid).unwrap(), "\"Unpaid\"");
    }

    #[test]
    fn dates_serialize_as_iso_calendar_dates() {
        let inv = Invoice::issue(draft(PaymentType::Cash, 10.0), "INV/2026/03/005".into(), test_now());
        let json = serde_json::to_value(&inv).unwrap();
        assert_eq!(json["invoice_date"], "2026-03-14");
        let back: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(back, inv);
    }
}
