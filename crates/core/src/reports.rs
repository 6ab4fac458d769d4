//! Cross-invoice aggregation: customer rollups and the sales summary.
//!
//! The store hands back raw invoice records; everything here is explicit
//! in-process aggregation over that slice. Monetary sums are plain `f64`
//! addition over client-supplied values — no rounding, no currency
//! normalization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::invoice::{Invoice, PaymentType};
use crate::numbering::first_instant_of_month;

/// Per-customer rollup across all invoices carrying that exact name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub name: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
    /// Sum of `total` over this customer's credit invoices.
    pub total_credit: f64,
    /// Sum of `amount_paid` over all of this customer's invoices.
    pub amount_paid: f64,
    /// `total_credit - amount_paid`.
    pub outstanding: f64,
    pub invoice_count: u64,
}

/// Group invoices by exact customer name (case-sensitive).
///
/// Invoices without a customer block are excluded entirely. Contact fields
/// are the most recently seen values: a later invoice overwrites mobile and
/// address whenever it carries them. Output is sorted by name.
pub fn customer_rollup(invoices: &[Invoice]) -> Vec<CustomerSummary> {
    let mut by_name: BTreeMap<String, CustomerSummary> = BTreeMap::new();

    for invoice in invoices {
        let Some(customer) = &invoice.customer else {
            continue;
        };

        let entry = by_name
            .entry(customer.name.clone())
            .or_insert_with(|| CustomerSummary {
                name: customer.name.clone(),
                mobile: None,
                address: None,
                total_credit: 0.0,
                amount_paid: 0.0,
                outstanding: 0.0,
                invoice_count: 0,
            });

        if customer.mobile.is_some() {
            entry.mobile = customer.mobile.clone();
        }
        if customer.address.is_some() {
            entry.address = customer.address.clone();
        }

        if invoice.payment_type == PaymentType::Credit {
            entry.total_credit += invoice.total;
        }
        entry.amount_paid += invoice.amount_paid;
        entry.invoice_count += 1;
    }

    let mut out: Vec<CustomerSummary> = by_name.into_values().collect();
    for c in &mut out {
        c.outstanding = c.total_credit - c.amount_paid;
    }
    out
}

/// One date-bucketed sales aggregate. Defaults to all zeros so an empty
/// bucket still reports concrete values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SalesBucket {
    pub total_sales: f64,
    pub cash_sales: f64,
    pub credit_sales: f64,
    pub invoice_count: u64,
}

impl SalesBucket {
    fn add(&mut self, invoice: &Invoice) {
        self.total_sales += invoice.total;
        match invoice.payment_type {
            PaymentType::Cash => self.cash_sales += invoice.total,
            PaymentType::Credit => self.credit_sales += invoice.total,
        }
        self.invoice_count += 1;
    }
}

/// The reports summary: today's sales, this month's sales, and the total
/// outstanding balance across all credit invoices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesSummary {
    pub today: SalesBucket,
    pub this_month: SalesBucket,
    pub total_outstanding: f64,
}

/// Aggregate the sales summary as of `now`.
///
/// `today` buckets on the invoice's calendar date; `this_month` buckets on
/// the creation instant (≥ first instant of the current month).
pub fn sales_summary(invoices: &[Invoice], now: DateTime<Utc>) -> SalesSummary {
    let today = now.date_naive();
    let month_start = first_instant_of_month(now);

    let mut summary = SalesSummary {
        today: SalesBucket::default(),
        this_month: SalesBucket::default(),
        total_outstanding: 0.0,
    };

    for invoice in invoices {
        if invoice.invoice_date == today {
            summary.today.add(invoice);
        }
        if invoice.created_at >= month_start {
            summary.this_month.add(invoice);
        }
        if invoice.payment_type == PaymentType::Credit {
            summary.total_outstanding += invoice.total - invoice.amount_paid;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{Customer, InvoiceItem, NewInvoice};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn issue(
        payment_type: PaymentType,
        total: f64,
        customer: Option<Customer>,
        at: DateTime<Utc>,
        number: &str,
    ) -> Invoice {
        Invoice::issue(
            NewInvoice {
                payment_type,
                customer,
                items: vec![InvoiceItem {
                    description: "Service".to_string(),
                    quantity: 1.0,
                    rate: total,
                    amount: total,
                }],
                subtotal: total,
                discount: 0.0,
                gst_rate: 0.0,
                gst_amount: 0.0,
                total,
                notes: None,
                terms: None,
                due_date: None,
            },
            number.to_string(),
            at,
        )
    }

    fn named(name: &str) -> Option<Customer> {
        Some(Customer {
            name: name.to_string(),
            mobile: None,
            address: None,
        })
    }

    fn t(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn rollup_excludes_invoices_without_a_customer() {
        let invoices = vec![
            issue(PaymentType::Cash, 100.0, None, t(1, 9), "INV/2026/06/001"),
            issue(PaymentType::Cash, 50.0, named("Acme"), t(1, 10), "INV/2026/06/002"),
        ];
        let rollup = customer_rollup(&invoices);
        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].name, "Acme");
        assert_eq!(rollup[0].invoice_count, 1);
    }

    #[test]
    fn rollup_keys_are_case_sensitive_exact_names() {
        let invoices = vec![
            issue(PaymentType::Cash, 10.0, named("acme"), t(1, 9), "INV/2026/06/001"),
            issue(PaymentType::Cash, 20.0, named("Acme"), t(1, 10), "INV/2026/06/002"),
        ];
        let rollup = customer_rollup(&invoices);
        assert_eq!(rollup.len(), 2);
    }

    #[test]
    fn rollup_outstanding_is_credit_total_minus_amount_paid() {
        let invoices = vec![
            // Credit 300: unpaid, contributes 300 to total_credit.
            issue(PaymentType::Credit, 300.0, named("Acme"), t(2, 9), "INV/2026/06/001"),
            // Cash 100: amount_paid = 100, no credit contribution.
            issue(PaymentType::Cash, 100.0, named("Acme"), t(2, 10), "INV/2026/06/002"),
        ];
        let rollup = customer_rollup(&invoices);
        assert_eq!(rollup[0].total_credit, 300.0);
        assert_eq!(rollup[0].amount_paid, 100.0);
        assert_eq!(rollup[0].outstanding, 200.0);
        assert_eq!(rollup[0].invoice_count, 2);
    }

    #[test]
    fn rollup_contact_fields_take_most_recently_seen_values() {
        let first = Some(Customer {
            name: "Acme".to_string(),
            mobile: Some("111".to_string()),
            address: Some("Old Street".to_string()),
        });
        let second = Some(Customer {
            name: "Acme".to_string(),
            mobile: Some("222".to_string()),
            address: None,
        });
        let invoices = vec![
            issue(PaymentType::Cash, 10.0, first, t(3, 9), "INV/2026/06/001"),
            issue(PaymentType::Cash, 10.0, second, t(3, 10), "INV/2026/06/002"),
        ];
        let rollup = customer_rollup(&invoices);
        assert_eq!(rollup[0].mobile.as_deref(), Some("222"));
        // Absent field does not erase the previously seen value.
        assert_eq!(rollup[0].address.as_deref(), Some("Old Street"));
    }

    #[test]
    fn summary_with_no_invoices_is_all_zeros() {
        let summary = sales_summary(&[], t(15, 12));
        assert_eq!(summary.today, SalesBucket::default());
        assert_eq!(summary.this_month, SalesBucket::default());
        assert_eq!(summary.total_outstanding, 0.0);
    }

    #[test]
    fn summary_buckets_today_by_invoice_date_and_month_by_created_at() {
        let now = t(15, 12);
        let invoices = vec![
            issue(PaymentType::Cash, 100.0, None, t(15, 9), "INV/2026/06/001"),
            issue(PaymentType::Credit, 200.0, None, t(15, 10), "INV/2026/06/002"),
            // Earlier in the month: counts for this_month but not today.
            issue(PaymentType::Cash, 50.0, None, t(2, 9), "INV/2026/06/003"),
            // Previous month: counts for neither bucket, but its credit
            // balance still feeds total_outstanding.
            issue(
                PaymentType::Credit,
                75.0,
                None,
                Utc.with_ymd_and_hms(2026, 5, 30, 9, 0, 0).unwrap(),
                "INV/2026/05/009",
            ),
        ];

        let summary = sales_summary(&invoices, now);
        assert_eq!(summary.today.total_sales, 300.0);
        assert_eq!(summary.today.cash_sales, 100.0);
        assert_eq!(summary.today.credit_sales, 200.0);
        assert_eq!(summary.today.invoice_count, 2);

        assert_eq!(summary.this_month.total_sales, 350.0);
        assert_eq!(summary.this_month.invoice_count, 3);

        assert_eq!(summary.total_outstanding, 275.0);
    }

    proptest! {
        #[test]
        fn rollup_invariants_hold_for_arbitrary_invoice_mixes(
            entries in proptest::collection::vec(
                (0u8..3, prop::bool::ANY, 1.0f64..10_000.0),
                0..40,
            )
        ) {
            let names = ["Acme", "Globex", "Initech"];
            let invoices: Vec<Invoice> = entries
                .iter()
                .enumerate()
                .map(|(i, (name_idx, is_cash, total))| {
                    let payment = if *is_cash { PaymentType::Cash } else { PaymentType::Credit };
                    issue(
                        payment,
                        *total,
                        named(names[*name_idx as usize]),
                        t(10, 0) + chrono::Duration::seconds(i as i64),
                        &format!("INV/2026/06/{:03}", i + 1),
                    )
                })
                .collect();

            let rollup = customer_rollup(&invoices);
            let total_count: u64 = rollup.iter().map(|c| c.invoice_count).sum();
            prop_assert_eq!(total_count, invoices.len() as u64);

            for c in &rollup {
                prop_assert!((c.outstanding - (c.total_credit - c.amount_paid)).abs() < 1e-9);
            }

            // Sorted, unique keys.
            for pair in rollup.windows(2) {
                prop_assert!(pair[0].name < pair[1].name);
            }
        }
    }
}
