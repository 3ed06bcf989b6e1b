use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::models::table::{self, Cell, Table, VoucherColumns};

/// Ajuste vindo da planilha Talões Pendentes, um por vendedor.
///
/// `adjusted_sales` e `adjusted_ratio` zerados significam "não informado":
/// o motor de premiação deriva os valores a partir das vendas consolidadas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherAdjustment {
    pub salesperson: String,
    pub out_of_policy: BigDecimal,
    pub adjusted_sales: BigDecimal,
    pub adjusted_ratio: BigDecimal,
}

impl VoucherAdjustment {
    /// Extrai os ajustes da tabela de talões.
    ///
    /// Só a coluna do vendedor é obrigatória; as numéricas ausentes valem
    /// zero, coluna inteira ausente inclusive.
    pub fn from_table(
        table: &Table,
        cols: &VoucherColumns,
    ) -> Result<Vec<VoucherAdjustment>, ReportError> {
        let index = table.index();

        let salesperson_col = index
            .get(&table::normalize(&cols.salesperson))
            .copied()
            .ok_or_else(|| ReportError::MissingColumn {
                table: "Talões Pendentes",
                column: cols.salesperson.clone(),
            })?;
        let out_of_policy_col = index.get(&table::normalize(&cols.out_of_policy)).copied();
        let adjusted_sales_col = index.get(&table::normalize(&cols.adjusted_sales)).copied();
        let adjusted_ratio_col = index.get(&table::normalize(&cols.adjusted_ratio)).copied();

        let decimal = |row: &[Cell], idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .and_then(Cell::as_decimal)
                .unwrap_or_else(BigDecimal::zero)
        };

        let mut adjustments = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let Some(salesperson) = row.get(salesperson_col).and_then(Cell::as_text) else {
                tracing::debug!("Talão sem VENDEDOR ignorado");
                continue;
            };

            adjustments.push(VoucherAdjustment {
                salesperson,
                out_of_policy: decimal(row, out_of_policy_col),
                adjusted_sales: decimal(row, adjusted_sales_col),
                adjusted_ratio: decimal(row, adjusted_ratio_col),
            });
        }

        Ok(adjustments)
    }
}
