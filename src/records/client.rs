use crate::masks::{mask_cnpj, mask_telefone};
use crate::template::ValueMap;
use serde::{Deserialize, Serialize};

/// A client company, in the shape the persistence layer serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub razao_social: String,

    /// Stored either bare or masked; always masked on output.
    #[serde(default)]
    pub cnpj: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,

    #[serde(default = "default_ativo")]
    pub ativo: bool,
}

fn default_ativo() -> bool {
    true
}

impl Default for ClientRecord {
    fn default() -> Self {
        Self {
            id: None,
            razao_social: String::new(),
            cnpj: String::new(),
            email: String::new(),
            telefone: None,
            endereco: None,
            ativo: true,
        }
    }
}

impl ClientRecord {
    pub fn new(razao_social: String, cnpj: String, email: String) -> Self {
        Self {
            razao_social,
            cnpj,
            email,
            ..Self::default()
        }
    }

    /// All placeholders a client can fill.
    ///
    /// Fields appear both namespaced (`cliente.cnpj`) and under the short
    /// names contract authors tend to type (`razaoSocial`, `cnpj`,
    /// `nome_cliente`).
    pub fn to_values(&self) -> ValueMap {
        let cnpj = mask_cnpj(&self.cnpj);
        let telefone = self.telefone.as_deref().map(mask_telefone);

        let fields = [
            ("razaoSocial", Some(self.razao_social.clone())),
            ("cnpj", Some(cnpj)),
            ("email", Some(self.email.clone())),
            ("telefone", telefone),
            ("endereco", self.endereco.clone()),
        ];

        let mut values = ValueMap::new();
        for (field, value) in &fields {
            values.insert(format!("cliente.{}", field), value.clone());
        }

        // short aliases
        values.insert("nome_cliente".to_string(), fields[0].1.clone());
        values.insert("razao_social".to_string(), fields[0].1.clone());
        for (field, value) in &fields {
            values.insert(field.to_string(), value.clone());
        }

        values
    }
}
