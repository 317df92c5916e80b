pub mod client;
pub mod contract;

pub use client::ClientRecord;
pub use contract::{ContractRecord, ContractStatus, ContractVersion};

use crate::error::{ContractError, Result};
use crate::template::renderer::format_date;
use crate::template::{ValueMap, CURRENT_DATE_VARIABLE};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

/// Values for the final, client-facing render of a contract.
///
/// Layered in this order, later layers overriding earlier ones: client
/// fields, contract fields, the current date, the contract's stored
/// variables.
pub fn final_values(
    client: &ClientRecord,
    contract: &ContractRecord,
    today: NaiveDate,
) -> ValueMap {
    let mut values = client.to_values();
    values.extend(contract.to_values());
    values.insert(CURRENT_DATE_VARIABLE.to_string(), Some(format_date(today)));
    values.extend(contract.stored_values());
    values
}

fn load_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ContractError::invalid_record(path, e.to_string()))
}

impl ClientRecord {
    pub fn from_json_file(path: &str) -> Result<Self> {
        load_json(path)
    }

    /// Loads a JSON array of clients.
    pub fn batch_from_json_file(path: &str) -> Result<Vec<Self>> {
        load_json(path)
    }
}

impl ContractRecord {
    pub fn from_json_file(path: &str) -> Result<Self> {
        load_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateRenderer;
    use std::io::Write;

    #[test]
    fn test_layering() {
        let client = ClientRecord::new(
            "ACME Corporation Ltda".to_string(),
            "12345678000190".to_string(),
            "juridico@acme.com.br".to_string(),
        );
        let mut contract = ContractRecord::new("Contrato".to_string(), String::new());
        contract
            .variaveis
            .insert("email".to_string(), "financeiro@acme.com.br".to_string());
        let today = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap();

        let values = final_values(&client, &contract, today);

        assert_eq!(values.get("data_atual"), Some(&Some("24/10/2025".to_string())));
        assert_eq!(values.get("contrato.titulo"), Some(&Some("Contrato".to_string())));
        assert_eq!(
            values.get("email"),
            Some(&Some("financeiro@acme.com.br".to_string()))
        );
        assert_eq!(
            values.get("cliente.email"),
            Some(&Some("juridico@acme.com.br".to_string()))
        );
    }

    #[test]
    fn test_company_name_fills_seed_template() {
        let client = ClientRecord::new(
            "ACME Corporation Ltda".to_string(),
            "12345678000190".to_string(),
            "juridico@acme.com.br".to_string(),
        );
        let contract = ContractRecord::new("Contrato".to_string(), String::new());
        let today = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap();

        let values = final_values(&client, &contract, today);
        let rendered = TemplateRenderer::with_date(today)
            .render("<p>{{razaoSocial}}</p><p>{{cnpj}}</p>", &values);

        assert_eq!(
            rendered,
            "<p>ACME Corporation Ltda</p><p>12.345.678/0001-90</p>"
        );
    }

    #[test]
    fn test_load_client_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"razaoSocial": "ACME", "cnpj": "1", "email": "a@b.c"}}"#).unwrap();

        let client = ClientRecord::from_json_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(client.razao_social, "ACME");
    }

    #[test]
    fn test_invalid_record_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();

        let err = ContractRecord::from_json_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ContractError::InvalidRecord { .. }));
    }
}
