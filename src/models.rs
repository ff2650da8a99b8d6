use serde::{Deserialize, Serialize};

// ============ Lookup API payload ============

/// Root of the payload returned by the external lookup API.
///
/// The upstream schema is not under our control, so every field is
/// optional and unknown fields are ignored. Only the identification
/// block is ever read; the full raw payload is still relayed untouched
/// by the proxy endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupResult {
    pub pessoa: Option<Pessoa>,
}

/// Person block of the lookup payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pessoa {
    pub identificacao: Option<Identificacao>,
}

/// Identification fields consumed by the result and receipt views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identificacao {
    /// Full name.
    pub nome: Option<String>,
    /// CPF digits as returned by the upstream service.
    pub cpf: Option<String>,
    /// Birth date, upstream format `YYYY-MM-DD HH:MM:SS`.
    pub data_nascimento: Option<String>,
    /// Sex code, `M` or `F`.
    pub sexo: Option<String>,
    /// Mother's name.
    pub nome_mae: Option<String>,
}

impl LookupResult {
    /// Convenience accessor for the identification block.
    pub fn identificacao(&self) -> Option<&Identificacao> {
        self.pessoa.as_ref().and_then(|p| p.identificacao.as_ref())
    }
}

// ============ Request parameters ============

/// Query parameters for the lookup proxy endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsultaParams {
    pub cpf: Option<String>,
}

/// Form body submitted by the landing page.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsultaForm {
    #[serde(default)]
    pub cpf: String,
}

/// Query parameters for the result view.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultadoParams {
    pub dados: Option<String>,
}

/// Query parameters for the receipt view.
///
/// All three are read directly from the URL with explicit defaulting:
/// a missing `valor` becomes zero, missing `cpf`/`nome` become empty.
/// `valor` arrives as a string so a malformed number can be sanitized
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecebimentoParams {
    #[serde(default)]
    pub valor: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub nome: String,
}

impl RecebimentoParams {
    /// Amount with boundary sanitization: absent or malformed -> 0.
    pub fn valor_num(&self) -> f64 {
        self.valor.trim().parse::<f64>().unwrap_or(0.0)
    }
}
