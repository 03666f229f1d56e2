use std::collections::BTreeSet;

use bigdecimal::BigDecimal;
use serde::Serialize;

/// A shipping option a buyer picks per cart line. The table is fixed and
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i32,
    pub name: &'static str,
    #[serde(rename = "rating", serialize_with = "tenths_as_text")]
    rating_tenths: i32,
    pub delivery_time: &'static str,
    #[serde(skip)]
    shipping_fee_cents: i64,
}

impl Supplier {
    /// Customer rating out of 5, one decimal place.
    pub fn rating(&self) -> BigDecimal {
        BigDecimal::new(self.rating_tenths.into(), 1)
    }

    pub fn shipping_fee(&self) -> BigDecimal {
        BigDecimal::new(self.shipping_fee_cents.into(), 2)
    }
}

pub const SUPPLIERS: [Supplier; 4] = [
    Supplier {
        id: 1,
        name: "Fast Express",
        rating_tenths: 45,
        delivery_time: "1-2 days",
        shipping_fee_cents: 599,
    },
    Supplier {
        id: 2,
        name: "Budget Shipping",
        rating_tenths: 38,
        delivery_time: "3-5 days",
        shipping_fee_cents: 299,
    },
    Supplier {
        id: 3,
        name: "Premium Logistics",
        rating_tenths: 49,
        delivery_time: "Next day",
        shipping_fee_cents: 999,
    },
    Supplier {
        id: 4,
        name: "Standard Delivery",
        rating_tenths: 42,
        delivery_time: "2-3 days",
        shipping_fee_cents: 499,
    },
];

fn tenths_as_text<S: serde::Serializer>(tenths: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BigDecimal::new((*tenths).into(), 1).to_string())
}

pub fn find_supplier(suppliers: &[Supplier], id: i32) -> Option<&Supplier> {
    suppliers.iter().find(|s| s.id == id)
}

/// Sum of shipping fees, each distinct supplier charged once. Ids missing
/// from `suppliers` contribute nothing.
pub fn shipping_total<I>(suppliers: &[Supplier], supplier_ids: I) -> BigDecimal
where
    I: IntoIterator<Item = i32>,
{
    supplier_ids
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter_map(|id| find_supplier(suppliers, id))
        .map(Supplier::shipping_fee)
        .sum()
}
