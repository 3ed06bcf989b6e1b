use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::models::table::{self, Cell, SalesColumns, Table};

/// Registro bruto da planilha DesVend, uma linha por lançamento.
/// Pares (loja, vendedor) repetidos são somados na consolidação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub store: String,
    pub salesperson: String,
    pub quota: BigDecimal,
    pub total_sales: BigDecimal,
    pub sales_count: i64,
    pub balance: BigDecimal,
}

impl SalesRecord {
    /// Extrai os registros da tabela DesVend com as colunas já mapeadas.
    ///
    /// As seis colunas são obrigatórias ([`ReportError::MissingColumn`]).
    /// Linhas sem loja ou vendedor são puladas; valores numéricos ausentes
    /// ou ilegíveis contam como zero.
    pub fn from_table(table: &Table, cols: &SalesColumns) -> Result<Vec<SalesRecord>, ReportError> {
        let index = table.index();
        let required = |name: &str| -> Result<usize, ReportError> {
            index
                .get(&table::normalize(name))
                .copied()
                .ok_or_else(|| ReportError::MissingColumn {
                    table: "DesVend",
                    column: name.to_string(),
                })
        };

        let store_col = required(&cols.store)?;
        let salesperson_col = required(&cols.salesperson)?;
        let quota_col = required(&cols.quota)?;
        let total_col = required(&cols.total_sales)?;
        let count_col = required(&cols.sales_count)?;
        let balance_col = required(&cols.balance)?;

        let decimal = |row: &[Cell], idx: usize| {
            row.get(idx)
                .and_then(Cell::as_decimal)
                .unwrap_or_else(BigDecimal::zero)
        };

        let mut records = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let Some(store) = row.get(store_col).and_then(Cell::as_text) else {
                tracing::debug!("Linha sem LOJA ignorada");
                continue;
            };
            let Some(salesperson) = row.get(salesperson_col).and_then(Cell::as_text) else {
                tracing::debug!("Linha da loja {} sem VENDEDOR ignorada", store);
                continue;
            };

            records.push(SalesRecord {
                store,
                salesperson,
                quota: decimal(row, quota_col),
                total_sales: decimal(row, total_col),
                sales_count: row.get(count_col).and_then(Cell::as_count).unwrap_or(0),
                balance: decimal(row, balance_col),
            });
        }

        Ok(records)
    }
}

/// Granularidade da consolidação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Store,
    #[default]
    StoreSalesperson,
}

/// Entrada consolidada: somas por chave + índices derivados.
///
/// Todos os índices guardam divisor zero substituindo por 0, nunca falham.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedEntry {
    pub store: String,
    /// `None` quando a consolidação foi por loja apenas.
    pub salesperson: Option<String>,
    pub quota: BigDecimal,
    pub total_sales: BigDecimal,
    pub sales_count: i64,
    pub balance: BigDecimal,
    /// TOTAL VENDAS / COTA TOTAL
    pub sales_ratio: BigDecimal,
    /// TOTAL VENDAS / QUANT VENDAS
    pub average_ticket: BigDecimal,
    /// SALDO COTA TOTAL / COTA TOTAL
    pub balance_ratio: BigDecimal,
}
