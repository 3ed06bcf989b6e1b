use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Célula de uma tabela de entrada.
///
/// As planilhas chegam com tipagem frouxa: números, texto ou vazio. Valores
/// não numéricos em colunas numéricas são tratados como ausentes, nunca como
/// erro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Texto da célula, aparado. Números também servem como chave (planilhas
    /// costumam trazer códigos de loja como número).
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(t) => {
                let t = t.trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t.to_string())
                }
            }
            Cell::Number(n) if n.is_finite() => Some(n.to_string()),
            _ => None,
        }
    }

    /// Valor decimal da célula; `None` quando ausente ou não numérico.
    pub fn as_decimal(&self) -> Option<BigDecimal> {
        match self {
            Cell::Number(n) if n.is_finite() => n.to_string().parse().ok(),
            Cell::Text(t) => t.trim().parse().ok(),
            _ => None,
        }
    }

    /// Contagem inteira; texto numérico também é aceito.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n as i64),
            Cell::Text(t) => {
                let t = t.trim();
                t.parse::<i64>()
                    .ok()
                    .or_else(|| t.parse::<f64>().ok().map(|v| v as i64))
            }
            _ => None,
        }
    }
}

/// Tabela de entrada (instantâneo imutável produzido pelo leitor de arquivos).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Índice nome normalizado -> posição, resolvido uma única vez na
    /// fronteira. A primeira ocorrência de um nome duplicado vence.
    pub fn index(&self) -> IndexMap<String, usize> {
        let mut index = IndexMap::with_capacity(self.columns.len());
        for (i, name) in self.columns.iter().enumerate() {
            index.entry(normalize(name)).or_insert(i);
        }
        index
    }
}

/// Normalização de nome de coluna: sem espaços nas bordas, caixa alta.
pub fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Mapeamento de colunas da planilha DesVend. Os nomes canônicos são o
/// padrão; o chamador pode renomear qualquer coluna.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesColumns {
    pub store: String,
    pub salesperson: String,
    pub quota: String,
    pub total_sales: String,
    pub sales_count: String,
    pub balance: String,
}

impl Default for SalesColumns {
    fn default() -> Self {
        Self {
            store: "LOJA".to_string(),
            salesperson: "VENDEDOR".to_string(),
            quota: "COTA TOTAL".to_string(),
            total_sales: "TOTAL VENDAS".to_string(),
            sales_count: "QUANT VENDAS".to_string(),
            balance: "SALDO COTA TOTAL".to_string(),
        }
    }
}

/// Mapeamento de colunas de Talões Pendentes. Só o vendedor é obrigatório;
/// as demais colunas, quando ausentes, valem zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoucherColumns {
    pub salesperson: String,
    pub out_of_policy: String,
    pub adjusted_sales: String,
    pub adjusted_ratio: String,
}

impl Default for VoucherColumns {
    fn default() -> Self {
        Self {
            salesperson: "VENDEDOR".to_string(),
            out_of_policy: "VENDAS FORA DA POLÍTICA".to_string(),
            adjusted_sales: "VENDAS ATUALIZADAS".to_string(),
            adjusted_ratio: "% VENDAS ATUALIZADAS".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[test]
    fn index_resolves_case_insensitive_and_trimmed() {
        let table = Table::new(
            vec!["  loja ".to_string(), "Cota Total".to_string()],
            vec![],
        );
        let index = table.index();
        assert_eq!(index.get(&normalize("LOJA")), Some(&0));
        assert_eq!(index.get(&normalize("cota total")), Some(&1));
        assert_eq!(index.get(&normalize("VENDEDOR")), None);
    }

    #[test]
    fn duplicate_column_first_occurrence_wins() {
        let table = Table::new(vec!["LOJA".to_string(), "loja".to_string()], vec![]);
        assert_eq!(table.index().get("LOJA"), Some(&0));
    }

    #[test]
    fn non_numeric_cell_is_absent() {
        assert_eq!(Cell::Text("n/d".to_string()).as_decimal(), None);
        assert_eq!(Cell::Null.as_decimal(), None);
        assert_eq!(Cell::Number(f64::NAN).as_decimal(), None);
        assert_eq!(
            Cell::Text(" 12.5 ".to_string()).as_decimal(),
            Some("12.5".parse::<BigDecimal>().unwrap())
        );
    }

    #[test]
    fn numeric_store_code_serves_as_key() {
        assert_eq!(Cell::Number(101.0).as_text(), Some("101".to_string()));
        assert_eq!(Cell::Text("  ".to_string()).as_text(), None);
    }

    #[test]
    fn deserializes_loose_json_cells() {
        let table: Table = serde_json::from_value(serde_json::json!({
            "columns": ["LOJA", "COTA TOTAL"],
            "rows": [["S1", 1000.0], ["S2", null]]
        }))
        .unwrap();
        assert_eq!(table.rows[0][1], Cell::Number(1000.0));
        assert_eq!(table.rows[1][1], Cell::Null);
    }
}
