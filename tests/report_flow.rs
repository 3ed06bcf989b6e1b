use bigdecimal::BigDecimal;
use serde_json::json;

use premiacoes_rust::export::{write_faturamento_csv, write_premiacao_csv};
use premiacoes_rust::models::{
    BonusOverride, GroupBy, JoinMode, PremiationParams, SalesColumns, SalesRecord, Table,
    VoucherAdjustment, VoucherColumns,
};
use premiacoes_rust::{consolidate, PremiationEngine};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn dec(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

/// Planilha DesVend como ela chega do leitor de arquivos: cabeçalhos com
/// variação de caixa, células numéricas e um lançamento duplicado de V1.
fn desvend_table() -> Table {
    serde_json::from_value(json!({
        "columns": ["Loja", "Vendedor", "Cota Total", "Total Vendas", "Quant Vendas", "Saldo Cota Total"],
        "rows": [
            ["S1", "V1", 600.0, 400.0, 6, 200.0],
            ["S1", "V1", 400.0, 200.0, 4, 200.0],
            ["S1", "V2", 1000.0, 300.0, 5, 700.0],
            ["S2", "V3", 500.0, 400.0, 2, 100.0],
            ["S2", "V4", 800.0, 100.0, 1, 700.0]
        ]
    }))
    .unwrap()
}

/// Talões Pendentes: V4 não aparece, portanto sai da premiação (inner join).
fn taloes_table() -> Table {
    serde_json::from_value(json!({
        "columns": ["VENDEDOR", "VENDAS FORA DA POLÍTICA"],
        "rows": [
            ["V1", 100.0],
            ["V2", 0.0],
            ["V3", 50.0]
        ]
    }))
    .unwrap()
}

fn engine(threshold: &str, bonus: &str, join_mode: JoinMode) -> PremiationEngine {
    PremiationEngine::new(PremiationParams {
        threshold: dec(threshold),
        bonus: dec(bonus),
        join_mode,
    })
}

// ---------------------------------------------------------------------------
// Fluxo completo: extração -> consolidação -> premiação -> exportação
// ---------------------------------------------------------------------------

#[test]
fn full_report_flow() {
    let records = SalesRecord::from_table(&desvend_table(), &SalesColumns::default()).unwrap();
    assert_eq!(records.len(), 5);

    let consolidated = consolidate(&records, GroupBy::StoreSalesperson);
    // V1 duplicado foi somado: 4 grupos em ordem ascendente
    assert_eq!(consolidated.len(), 4);
    assert_eq!(consolidated[0].salesperson.as_deref(), Some("V1"));
    assert_eq!(consolidated[0].quota, dec("1000"));
    assert_eq!(consolidated[0].total_sales, dec("600"));
    assert_eq!(consolidated[0].sales_count, 10);
    assert_eq!(consolidated[0].average_ticket, dec("60"));

    let vouchers = VoucherAdjustment::from_table(&taloes_table(), &VoucherColumns::default()).unwrap();
    let outcome = engine("0.45", "100", JoinMode::Inner).evaluate(&consolidated, &vouchers, &[]);

    // V4 não tem talão: descartado e contabilizado
    assert_eq!(outcome.stats.salespeople_evaluated, 3);
    assert_eq!(outcome.stats.salespeople_dropped, 1);
    assert_eq!(outcome.stats.stores, 2);
    assert_eq!(outcome.stats.total_bonus, dec("200"));

    // S1: V1 ajustado 500/1000 = 0.5 premiado; V2 300/1000 = 0.3 não
    let s1 = &outcome.stores[0];
    assert_eq!(s1.store, "S1");
    assert_eq!(s1.bonus, dec("100"));
    assert_eq!(s1.total_value, dec("1000"));

    // S2: só V3 (350/500 = 0.7 premiado); V4 não afeta nenhum total
    let s2 = &outcome.stores[1];
    assert_eq!(s2.store, "S2");
    assert_eq!(s2.quota, dec("500"));
    assert_eq!(s2.total_sales, dec("400"));
    assert_eq!(s2.bonus, dec("100"));
    assert_eq!(s2.total_value, dec("500"));

    // Exportação com formatação brasileira
    let mut buffer = Vec::new();
    write_premiacao_csv(&outcome.stores, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("LOJA,COTA TOTAL,"));
    assert!(text.contains("R$ 1.000,00"));
    assert!(text.contains("45,0%"));
}

#[test]
fn rerunning_the_pipeline_is_bit_identical() {
    let records = SalesRecord::from_table(&desvend_table(), &SalesColumns::default()).unwrap();
    let vouchers = VoucherAdjustment::from_table(&taloes_table(), &VoucherColumns::default()).unwrap();
    let engine = engine("0.45", "100", JoinMode::Inner);

    let first = engine.evaluate(&consolidate(&records, GroupBy::StoreSalesperson), &vouchers, &[]);
    let second = engine.evaluate(&consolidate(&records, GroupBy::StoreSalesperson), &vouchers, &[]);

    assert_eq!(first.rows, second.rows);
    assert_eq!(first.stores, second.stores);

    let mut a = Vec::new();
    let mut b = Vec::new();
    write_premiacao_csv(&first.stores, &mut a).unwrap();
    write_premiacao_csv(&second.stores, &mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn manual_override_flows_into_store_totals() {
    let records = SalesRecord::from_table(&desvend_table(), &SalesColumns::default()).unwrap();
    let vouchers = VoucherAdjustment::from_table(&taloes_table(), &VoucherColumns::default()).unwrap();
    let consolidated = consolidate(&records, GroupBy::StoreSalesperson);

    // Com corte em 60%, V2 (0.3) segue sem prêmio e V1 (0.5) também
    let engine = engine("0.6", "100", JoinMode::Inner);
    let automatic = engine.evaluate(&consolidated, &vouchers, &[]);
    assert_eq!(automatic.stores[0].bonus, dec("0"));

    let overrides = vec![BonusOverride {
        store: "S1".to_string(),
        salesperson: "V1".to_string(),
        awarded: true,
        bonus: dec("150"),
    }];
    let manual = engine.evaluate(&consolidated, &vouchers, &overrides);
    assert_eq!(manual.stores[0].bonus, dec("150"));
    assert_eq!(manual.stores[0].total_value, dec("1050"));
}

#[test]
fn faturamento_export_groups_by_store_when_asked() {
    let records = SalesRecord::from_table(&desvend_table(), &SalesColumns::default()).unwrap();
    let by_store = consolidate(&records, GroupBy::Store);
    assert_eq!(by_store.len(), 2);
    assert_eq!(by_store[0].salesperson, None);
    assert_eq!(by_store[0].quota, dec("2000"));

    let mut buffer = Vec::new();
    write_faturamento_csv(&by_store, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("LOJA,VENDEDOR,"));
    assert!(text.contains("S1,,"));
}
