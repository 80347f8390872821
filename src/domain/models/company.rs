use serde::{Deserialize, Serialize};

use crate::domain::tenant::TenantKey;

/// A registered company (`empresas` relation). The CNPJ is the tenant key;
/// every other tenant-owned relation is scoped by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub cnpj: TenantKey,
    #[serde(rename = "razao_social")]
    pub legal_name: String,
    #[serde(rename = "nome_fantasia")]
    pub trade_name: Option<String>,
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    #[serde(rename = "uf")]
    pub state: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "origem")]
    pub origin: String,
}

impl Company {
    /// Trade name when present, legal name otherwise. This is what every
    /// screen shows as the company header.
    pub fn display_name(&self) -> &str {
        self.trade_name.as_deref().unwrap_or(&self.legal_name)
    }
}
