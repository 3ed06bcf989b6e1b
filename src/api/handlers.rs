use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::PremiacaoConfig;
use crate::error::ReportError;
use crate::models::{
    BonusOverride, ConsolidatedEntry, GroupBy, JoinMode, PremiationEntry, PremiationStats,
    SalesColumns, SalesRecord, StorePremiation, Table, VoucherAdjustment, VoucherColumns,
};
use crate::service::{consolidate, PremiationEngine};

/// Requisição do relatório de faturamento
#[derive(Debug, Deserialize)]
pub struct FaturamentoRequest {
    pub sales: Table,
    #[serde(default)]
    pub columns: SalesColumns,
    #[serde(default)]
    pub group_by: GroupBy,
}

/// Resposta do relatório de faturamento
#[derive(Debug, Serialize)]
pub struct FaturamentoResponse {
    pub success: bool,
    pub message: String,
    pub rows: Option<Vec<ConsolidatedEntry>>,
}

/// Requisição do relatório de premiações (parâmetros ausentes caem nos
/// defaults configurados; `overrides` vazio = modo automático)
#[derive(Debug, Deserialize)]
pub struct PremiacaoRequest {
    pub sales: Table,
    pub vouchers: Table,
    #[serde(default)]
    pub sales_columns: SalesColumns,
    #[serde(default)]
    pub voucher_columns: VoucherColumns,
    pub threshold_percent: Option<f64>,
    pub bonus: Option<f64>,
    pub join_mode: Option<JoinMode>,
    #[serde(default)]
    pub overrides: Vec<BonusOverride>,
}

/// Resposta do relatório de premiações (com estatísticas)
#[derive(Debug, Serialize)]
pub struct PremiacaoResponse {
    pub success: bool,
    pub message: String,
    pub stats: Option<PremiationStats>,
    pub rows: Option<Vec<PremiationEntry>>,
    pub stores: Option<Vec<StorePremiation>>,
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

fn status_for(error: &ReportError) -> StatusCode {
    match error {
        ReportError::MissingColumn { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Relatório de faturamento consolidado
pub async fn faturamento_report(Json(req): Json<FaturamentoRequest>) -> Response {
    match SalesRecord::from_table(&req.sales, &req.columns) {
        Ok(records) => {
            let rows = consolidate(&records, req.group_by);
            let response = FaturamentoResponse {
                success: true,
                message: format!("Consolidated {} groups from {} records", rows.len(), records.len()),
                rows: Some(rows),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = FaturamentoResponse {
                success: false,
                message: format!("Error: {}", e),
                rows: None,
            };
            (status_for(&e), Json(response)).into_response()
        }
    }
}

/// Relatório de premiações por loja
pub async fn premiacao_report(
    State(config): State<Arc<PremiacaoConfig>>,
    Json(req): Json<PremiacaoRequest>,
) -> Response {
    // parâmetros da requisição sobrepõem os defaults configurados
    let mut effective = (*config).clone();
    if let Some(threshold) = req.threshold_percent {
        effective.threshold_percent = threshold;
    }
    if let Some(bonus) = req.bonus {
        effective.bonus = bonus;
    }
    if let Some(join_mode) = req.join_mode {
        effective.join_mode = join_mode;
    }

    let records = match SalesRecord::from_table(&req.sales, &req.sales_columns) {
        Ok(records) => records,
        Err(e) => return premiacao_error(e),
    };
    let vouchers = match VoucherAdjustment::from_table(&req.vouchers, &req.voucher_columns) {
        Ok(vouchers) => vouchers,
        Err(e) => return premiacao_error(e),
    };

    let consolidated = consolidate(&records, GroupBy::StoreSalesperson);
    let engine = PremiationEngine::new(effective.params());
    let outcome = engine.evaluate(&consolidated, &vouchers, &req.overrides);

    let response = PremiacaoResponse {
        success: true,
        message: format!(
            "Premiação calculada: {} lojas, {} vendedores ({} sem talão)",
            outcome.stats.stores,
            outcome.stats.salespeople_evaluated,
            outcome.stats.salespeople_dropped
        ),
        stats: Some(outcome.stats),
        rows: Some(outcome.rows),
        stores: Some(outcome.stores),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn premiacao_error(error: ReportError) -> Response {
    let response = PremiacaoResponse {
        success: false,
        message: format!("Error: {}", error),
        stats: None,
        rows: None,
        stores: None,
    };
    (status_for(&error), Json(response)).into_response()
}
