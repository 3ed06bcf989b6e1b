use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::models::{JoinMode, PremiationParams};

/// Configuração da aplicação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub premiacao: PremiacaoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Parâmetros padrão da premiação; a requisição pode sobrepor qualquer um.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiacaoConfig {
    /// Percentual mínimo para premiar, em 0–100 (ex.: 45 = 45%).
    pub threshold_percent: f64,
    /// Valor fixo da premiação (R$).
    pub bonus: f64,
    pub join_mode: JoinMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            premiacao: PremiacaoConfig::default(),
        }
    }
}

impl Default for PremiacaoConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 45.0,
            bonus: 100.0,
            join_mode: JoinMode::Inner,
        }
    }
}

impl AppConfig {
    /// Carrega a configuração das variáveis de ambiente
    pub fn from_env() -> Self {
        let defaults = PremiacaoConfig::default();
        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            premiacao: PremiacaoConfig {
                threshold_percent: std::env::var("PREMIACAO_THRESHOLD_PERCENT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.threshold_percent),
                bonus: std::env::var("PREMIACAO_BONUS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.bonus),
                join_mode: match std::env::var("PREMIACAO_JOIN_MODE").ok().as_deref() {
                    Some(v) if v.eq_ignore_ascii_case("left") => JoinMode::Left,
                    _ => JoinMode::Inner,
                },
            },
        }
    }
}

impl PremiacaoConfig {
    /// Converte para os parâmetros do motor (percentual dividido por 100).
    pub fn params(&self) -> PremiationParams {
        let hundred = BigDecimal::from(100);
        PremiationParams {
            threshold: decimal_from_f64(self.threshold_percent) / hundred,
            bonus: decimal_from_f64(self.bonus),
            join_mode: self.join_mode,
        }
    }
}

fn decimal_from_f64(value: f64) -> BigDecimal {
    if value.is_finite() {
        value
            .to_string()
            .parse()
            .unwrap_or_else(|_| BigDecimal::zero())
    } else {
        BigDecimal::zero()
    }
}
