//! Sales ledger held in memory.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::ports::{SalesLedger, SalesLedgerError};
use crate::domain::{DateRange, Sale};

#[derive(Debug, Default)]
pub struct InMemorySalesLedger {
    sales: DashMap<Uuid, Sale>,
}

impl InMemorySalesLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SalesLedger for InMemorySalesLedger {
    async fn record(&self, sale: &Sale) -> Result<(), SalesLedgerError> {
        self.sales.insert(sale.id, sale.clone());
        Ok(())
    }

    async fn sales_between(&self, range: &DateRange) -> Result<Vec<Sale>, SalesLedgerError> {
        let mut sales: Vec<Sale> = self
            .sales
            .iter()
            .filter(|entry| range.contains(entry.sold_on))
            .map(|entry| entry.value().clone())
            .collect();
        sales.sort_by_key(|sale| (sale.sold_on, sale.recorded_at));
        Ok(sales)
    }
}
