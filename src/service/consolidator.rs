use bigdecimal::{BigDecimal, Zero};
use std::collections::BTreeMap;

use crate::models::{ConsolidatedEntry, GroupBy, SalesRecord};

/// Divisão com guarda: divisor zero devolve 0 em vez de falhar.
/// É a política de falha de todo o relatório (loja com cota zero não pode
/// derrubar o cálculo).
pub fn ratio_or_zero(num: &BigDecimal, den: &BigDecimal) -> BigDecimal {
    if den.is_zero() {
        BigDecimal::zero()
    } else {
        num / den
    }
}

#[derive(Default)]
struct Accumulator {
    quota: BigDecimal,
    total_sales: BigDecimal,
    sales_count: i64,
    balance: BigDecimal,
}

/// Consolida os registros brutos na granularidade pedida.
///
/// Soma cota, vendas, quantidade e saldo por chave e deriva os índices.
/// Função pura; a saída sai ordenada ascendente pela chave (loja, vendedor),
/// ordem determinística independente da ordem de entrada.
pub fn consolidate(records: &[SalesRecord], group_by: GroupBy) -> Vec<ConsolidatedEntry> {
    let mut groups: BTreeMap<(String, Option<String>), Accumulator> = BTreeMap::new();

    for record in records {
        let key = match group_by {
            GroupBy::Store => (record.store.clone(), None),
            GroupBy::StoreSalesperson => {
                (record.store.clone(), Some(record.salesperson.clone()))
            }
        };
        let acc = groups.entry(key).or_default();
        acc.quota += &record.quota;
        acc.total_sales += &record.total_sales;
        acc.sales_count += record.sales_count;
        acc.balance += &record.balance;
    }

    groups
        .into_iter()
        .map(|((store, salesperson), acc)| {
            let count = BigDecimal::from(acc.sales_count);
            ConsolidatedEntry {
                sales_ratio: ratio_or_zero(&acc.total_sales, &acc.quota),
                average_ticket: ratio_or_zero(&acc.total_sales, &count),
                balance_ratio: ratio_or_zero(&acc.balance, &acc.quota),
                store,
                salesperson,
                quota: acc.quota,
                total_sales: acc.total_sales,
                sales_count: acc.sales_count,
                balance: acc.balance,
            }
        })
        .collect()
}
