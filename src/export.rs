use bigdecimal::BigDecimal;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ReportError;
use crate::models::{ConsolidatedEntry, StorePremiation};

/// Ordem canônica das colunas do relatório de premiações.
pub const PREMIACAO_HEADERS: [&str; 13] = [
    "LOJA",
    "COTA TOTAL",
    "TOTAL VENDAS",
    "QUANT VENDAS",
    "% VENDAS",
    "TICK MEDIO",
    "SALDO COTA TOTAL",
    "% SALDO COTA",
    "VENDAS FORA DA POLÍTICA",
    "VENDAS ATUALIZADAS",
    "% VENDAS ATUALIZADAS",
    "VALOR",
    "TOTAL LOJA",
];

/// Ordem canônica das colunas do relatório de faturamento.
pub const FATURAMENTO_HEADERS: [&str; 9] = [
    "LOJA",
    "VENDEDOR",
    "COTA TOTAL",
    "TOTAL VENDAS",
    "QUANT VENDAS",
    "% VENDAS",
    "TICK MEDIO",
    "SALDO COTA TOTAL",
    "% SALDO COTA",
];

/// Formata moeda no padrão brasileiro: `R$ 1.234,56`.
pub fn format_currency(value: &BigDecimal) -> String {
    let scaled = value.round(2).with_scale(2);
    let text = scaled.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!("R$ {}{},{}", sign, int_grouped, frac_part)
}

/// Formata fração como percentual de uma casa: `0.5` -> `50,0%`.
pub fn format_percent(value: &BigDecimal) -> String {
    let hundred = BigDecimal::from(100);
    let pct = (value * &hundred).round(1).with_scale(1);
    format!("{}%", pct.to_string().replace('.', ","))
}

/// Escreve o relatório de premiações por loja em CSV formatado.
pub fn write_premiacao_csv<W: Write>(
    stores: &[StorePremiation],
    writer: W,
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(PREMIACAO_HEADERS)?;

    for store in stores {
        csv_writer.write_record(&[
            store.store.clone(),
            format_currency(&store.quota),
            format_currency(&store.total_sales),
            store.sales_count.to_string(),
            format_percent(&store.sales_ratio),
            format_currency(&store.average_ticket),
            format_currency(&store.balance),
            format_percent(&store.balance_ratio),
            format_currency(&store.out_of_policy),
            format_currency(&store.adjusted_sales),
            format_percent(&store.adjusted_ratio),
            format_currency(&store.bonus),
            format_currency(&store.total_value),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Escreve o relatório de faturamento consolidado em CSV formatado.
pub fn write_faturamento_csv<W: Write>(
    entries: &[ConsolidatedEntry],
    writer: W,
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(FATURAMENTO_HEADERS)?;

    for entry in entries {
        csv_writer.write_record(&[
            entry.store.clone(),
            entry.salesperson.clone().unwrap_or_default(),
            format_currency(&entry.quota),
            format_currency(&entry.total_sales),
            entry.sales_count.to_string(),
            format_percent(&entry.sales_ratio),
            format_currency(&entry.average_ticket),
            format_currency(&entry.balance),
            format_percent(&entry.balance_ratio),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Conveniência: grava o relatório de premiações em arquivo.
pub fn premiacao_to_csv_file(
    stores: &[StorePremiation],
    output_path: &Path,
) -> Result<(), ReportError> {
    let file = File::create(output_path)?;
    write_premiacao_csv(stores, file)
}
