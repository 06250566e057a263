use crate::domain::models::{CenterCount, ProductTotal, RowRecord, Summary};
use indexmap::{IndexMap, IndexSet};

pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Builds both summary views. Ties keep first-encounter order.
pub fn summarize(rows: &[RowRecord], top_n: usize) -> Summary {
    Summary {
        top_products: top_products(rows, top_n),
        po_per_distribution_center: po_per_center(rows),
    }
}

pub fn top_products(rows: &[RowRecord], top_n: usize) -> Vec<ProductTotal> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for r in rows {
        *totals.entry(r.product_name.as_str()).or_insert(0.0) += r.quantity;
    }
    let mut out: Vec<ProductTotal> = totals
        .into_iter()
        .map(|(name, total)| ProductTotal {
            product_name: name.to_string(),
            total_quantity: total,
        })
        .collect();
    out.sort_by(|a, b| b.total_quantity.total_cmp(&a.total_quantity));
    out.truncate(top_n);
    out
}

pub fn po_per_center(rows: &[RowRecord]) -> Vec<CenterCount> {
    let mut groups: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for r in rows {
        groups
            .entry(r.distribution_center.as_str())
            .or_default()
            .insert(r.po_number.as_str());
    }
    let mut out: Vec<CenterCount> = groups
        .into_iter()
        .map(|(center, pos)| CenterCount {
            distribution_center: center.to_string(),
            po_count: pos.len(),
        })
        .collect();
    out.sort_by(|a, b| b.po_count.cmp(&a.po_count));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(po: &str, dc: &str, product: &str, qty: f64) -> RowRecord {
        RowRecord {
            po_date: "2024-01-01".to_string(),
            po_number: po.to_string(),
            distribution_center: dc.to_string(),
            product_name: product.to_string(),
            quantity: qty,
        }
    }

    #[test]
    fn quantities_are_summed_per_product() {
        let rows = vec![
            row("P1", "DC", "A", 30.0),
            row("P1", "DC", "B", 10.0),
            row("P2", "DC", "A", 5.0),
        ];
        let top = top_products(&rows, 10);
        assert_eq!(
            top,
            vec![
                ProductTotal {
                    product_name: "A".to_string(),
                    total_quantity: 35.0
                },
                ProductTotal {
                    product_name: "B".to_string(),
                    total_quantity: 10.0
                },
            ]
        );
    }

    #[test]
    fn ties_keep_encounter_order_and_list_is_truncated() {
        let rows: Vec<RowRecord> = ["Z", "Y", "X", "W"]
            .iter()
            .map(|p| row("P1", "DC", p, 4.0))
            .chain(std::iter::once(row("P1", "DC", "V", 9.0)))
            .collect();
        let top = top_products(&rows, 3);
        let names: Vec<&str> = top.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["V", "Z", "Y"]);
    }

    #[test]
    fn centers_count_distinct_purchase_orders() {
        let rows = vec![
            row("P1", "Surabaya", "A", 1.0),
            row("P1", "Jakarta", "A", 1.0),
            row("P2", "Jakarta", "B", 1.0),
            row("P2", "Jakarta", "C", 1.0),
            row("P3", "Surabaya", "A", 1.0),
            row("P4", "Medan", "A", 1.0),
        ];
        let counts = po_per_center(&rows);
        let flat: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.distribution_center.as_str(), c.po_count))
            .collect();
        assert_eq!(flat, vec![("Surabaya", 2), ("Jakarta", 2), ("Medan", 1)]);
    }

    #[test]
    fn summarize_is_idempotent() {
        let rows = vec![
            row("P1", "DC1", "A", 2.0),
            row("P2", "DC2", "B", 3.0),
            row("P2", "DC1", "A", 1.0),
        ];
        let first = summarize(&rows, DEFAULT_TOP_PRODUCTS);
        let second = summarize(&rows, DEFAULT_TOP_PRODUCTS);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_rows_give_empty_views() {
        let s = summarize(&[], DEFAULT_TOP_PRODUCTS);
        assert!(s.top_products.is_empty());
        assert!(s.po_per_distribution_center.is_empty());
    }
}
