use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Modo de junção entre DesVend e Talões Pendentes.
///
/// `Inner` (padrão) considera apenas vendedores presentes nas duas tabelas;
/// sem talão não há como avaliar a premiação. `Left` mantém os demais com
/// campos de talão zerados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    #[default]
    Inner,
    Left,
}

/// Parâmetros do motor de premiação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiationParams {
    /// Fração 0.0–1.0 (a entrada em percentual já dividida por 100).
    pub threshold: BigDecimal,
    /// Valor fixo concedido a cada vendedor premiado.
    pub bonus: BigDecimal,
    pub join_mode: JoinMode,
}

/// Sobrescrita manual de uma linha, chaveada por (loja, vendedor).
/// Aplicada ao instantâneo por vendedor antes da reagregação; as tabelas
/// de origem nunca são alteradas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusOverride {
    pub store: String,
    pub salesperson: String,
    pub awarded: bool,
    pub bonus: BigDecimal,
}

/// Linha de premiação por vendedor, após a junção com os talões.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiationEntry {
    pub store: String,
    pub salesperson: String,
    pub quota: BigDecimal,
    pub total_sales: BigDecimal,
    pub sales_count: i64,
    pub balance: BigDecimal,
    pub sales_ratio: BigDecimal,
    pub average_ticket: BigDecimal,
    pub balance_ratio: BigDecimal,
    pub out_of_policy: BigDecimal,
    pub adjusted_sales: BigDecimal,
    pub adjusted_ratio: BigDecimal,
    pub awarded: bool,
    pub bonus: BigDecimal,
}

/// Totais de premiação por loja.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePremiation {
    pub store: String,
    pub quota: BigDecimal,
    pub total_sales: BigDecimal,
    pub sales_count: i64,
    pub sales_ratio: BigDecimal,
    pub average_ticket: BigDecimal,
    pub balance: BigDecimal,
    pub balance_ratio: BigDecimal,
    pub out_of_policy: BigDecimal,
    pub adjusted_sales: BigDecimal,
    /// Média simples entre os vendedores da loja (comportamento herdado do
    /// relatório original; os demais campos são somas).
    pub adjusted_ratio: BigDecimal,
    pub bonus: BigDecimal,
    /// TOTAL VENDAS + VALOR.
    pub total_value: BigDecimal,
}

/// Estatísticas de uma rodada de premiação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiationStats {
    pub salespeople_evaluated: usize,
    /// Vendedores presentes em DesVend sem talão correspondente (inner join).
    pub salespeople_dropped: usize,
    pub stores: usize,
    pub total_bonus: BigDecimal,
    pub generated_at: DateTime<Utc>,
}

/// Resultado completo: linhas por vendedor, totais por loja e estatísticas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiationOutcome {
    pub rows: Vec<PremiationEntry>,
    pub stores: Vec<StorePremiation>,
    pub stats: PremiationStats,
}
