use thiserror::Error;

/// Erros do cálculo de relatórios.
///
/// A única falha fatal do núcleo é coluna obrigatória ausente; divisões por
/// zero nunca falham (substituídas por 0) e vendedores sem talão no inner
/// join são descartados e contabilizados nas estatísticas, não erros.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("coluna obrigatória ausente em {table}: {column}")]
    MissingColumn {
        table: &'static str,
        column: String,
    },

    #[error("erro na exportação CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
