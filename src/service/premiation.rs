use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    BonusOverride, ConsolidatedEntry, JoinMode, PremiationEntry, PremiationOutcome,
    PremiationParams, PremiationStats, StorePremiation, VoucherAdjustment,
};
use crate::service::consolidator::ratio_or_zero;

/// Motor de premiação.
///
/// Junta as vendas consolidadas por (loja, vendedor) com os talões
/// pendentes, decide o prêmio por vendedor e reagrega por loja.
/// Passo único, puro: nenhuma entrada é alterada e rodadas repetidas sobre
/// as mesmas tabelas produzem o mesmo resultado.
pub struct PremiationEngine {
    params: PremiationParams,
}

impl PremiationEngine {
    pub fn new(params: PremiationParams) -> Self {
        Self { params }
    }

    /// Avalia a premiação.
    ///
    /// `overrides` vazio corresponde ao modo automático; preenchido, cada
    /// sobrescrita substitui o par premiado/valor da linha antes da
    /// reagregação.
    pub fn evaluate(
        &self,
        consolidated: &[ConsolidatedEntry],
        vouchers: &[VoucherAdjustment],
        overrides: &[BonusOverride],
    ) -> PremiationOutcome {
        // Índice por vendedor; a primeira ocorrência vence (um talão por
        // vendedor), preservando a ordem da planilha.
        let mut voucher_index: IndexMap<&str, &VoucherAdjustment> = IndexMap::new();
        for voucher in vouchers {
            voucher_index.entry(voucher.salesperson.as_str()).or_insert(voucher);
        }

        let override_index: HashMap<(&str, &str), &BonusOverride> = overrides
            .iter()
            .map(|o| ((o.store.as_str(), o.salesperson.as_str()), o))
            .collect();

        let mut rows: Vec<PremiationEntry> = Vec::with_capacity(consolidated.len());
        let mut dropped = 0usize;

        for entry in consolidated {
            let Some(salesperson) = entry.salesperson.as_deref() else {
                tracing::warn!(
                    "Linha da loja {} sem vendedor, fora da premiação",
                    entry.store
                );
                continue;
            };

            let voucher = voucher_index.get(salesperson).copied();
            if voucher.is_none() && self.params.join_mode == JoinMode::Inner {
                tracing::debug!("Vendedor {} sem talão pendente, descartado", salesperson);
                dropped += 1;
                continue;
            }

            let out_of_policy = voucher
                .map(|v| v.out_of_policy.clone())
                .unwrap_or_else(BigDecimal::zero);

            // Valor informado na planilha vence; zerado significa "derivar".
            let adjusted_sales = match voucher {
                Some(v) if !v.adjusted_sales.is_zero() => v.adjusted_sales.clone(),
                _ => &entry.total_sales - &out_of_policy,
            };
            let adjusted_ratio = match voucher {
                Some(v) if !v.adjusted_ratio.is_zero() => v.adjusted_ratio.clone(),
                _ => ratio_or_zero(&adjusted_sales, &entry.quota),
            };

            let mut awarded = adjusted_ratio >= self.params.threshold;
            let mut bonus = if awarded {
                self.params.bonus.clone()
            } else {
                BigDecimal::zero()
            };

            if let Some(o) = override_index.get(&(entry.store.as_str(), salesperson)) {
                awarded = o.awarded;
                bonus = o.bonus.clone();
            }

            rows.push(PremiationEntry {
                store: entry.store.clone(),
                salesperson: salesperson.to_string(),
                quota: entry.quota.clone(),
                total_sales: entry.total_sales.clone(),
                sales_count: entry.sales_count,
                balance: entry.balance.clone(),
                sales_ratio: entry.sales_ratio.clone(),
                average_ticket: entry.average_ticket.clone(),
                balance_ratio: entry.balance_ratio.clone(),
                out_of_policy,
                adjusted_sales,
                adjusted_ratio,
                awarded,
                bonus,
            });
        }

        let stores = aggregate_by_store(&rows);
        let total_bonus = stores
            .iter()
            .fold(BigDecimal::zero(), |acc, s| acc + &s.bonus);

        let stats = PremiationStats {
            salespeople_evaluated: rows.len(),
            salespeople_dropped: dropped,
            stores: stores.len(),
            total_bonus,
            generated_at: Utc::now(),
        };

        tracing::info!(
            "Premiação: {} vendedores avaliados, {} descartados, {} lojas, prêmios = {}",
            stats.salespeople_evaluated,
            stats.salespeople_dropped,
            stats.stores,
            stats.total_bonus
        );

        PremiationOutcome { rows, stores, stats }
    }
}

#[derive(Default)]
struct StoreAccumulator {
    quota: BigDecimal,
    total_sales: BigDecimal,
    sales_count: i64,
    balance: BigDecimal,
    out_of_policy: BigDecimal,
    adjusted_sales: BigDecimal,
    ratio_sum: BigDecimal,
    bonus: BigDecimal,
    salespeople: i64,
}

/// Reagrega as linhas por loja, ascendente pela loja.
///
/// Tudo é soma, exceto `adjusted_ratio` (média simples entre os vendedores);
/// os índices de venda e saldo são recalculados sobre os totais somados.
fn aggregate_by_store(rows: &[PremiationEntry]) -> Vec<StorePremiation> {
    let mut groups: BTreeMap<&str, StoreAccumulator> = BTreeMap::new();

    for row in rows {
        let acc = groups.entry(row.store.as_str()).or_default();
        acc.quota += &row.quota;
        acc.total_sales += &row.total_sales;
        acc.sales_count += row.sales_count;
        acc.balance += &row.balance;
        acc.out_of_policy += &row.out_of_policy;
        acc.adjusted_sales += &row.adjusted_sales;
        acc.ratio_sum += &row.adjusted_ratio;
        acc.bonus += &row.bonus;
        acc.salespeople += 1;
    }

    groups
        .into_iter()
        .map(|(store, acc)| {
            let count = BigDecimal::from(acc.sales_count);
            let salespeople = BigDecimal::from(acc.salespeople);
            StorePremiation {
                store: store.to_string(),
                sales_ratio: ratio_or_zero(&acc.total_sales, &acc.quota),
                average_ticket: ratio_or_zero(&acc.total_sales, &count),
                balance_ratio: ratio_or_zero(&acc.balance, &acc.quota),
                adjusted_ratio: ratio_or_zero(&acc.ratio_sum, &salespeople),
                total_value: &acc.total_sales + &acc.bonus,
                quota: acc.quota,
                total_sales: acc.total_sales,
                sales_count: acc.sales_count,
                balance: acc.balance,
                out_of_policy: acc.out_of_policy,
                adjusted_sales: acc.adjusted_sales,
                bonus: acc.bonus,
            }
        })
        .collect()
}
