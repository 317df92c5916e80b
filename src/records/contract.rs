use crate::template::renderer::format_date;
use crate::template::{
    prepare_for_substitution, TemplateRenderer, ValueMap, CURRENT_DATE_VARIABLE,
};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    Ativo,
    Inativo,
    Pendente,
    Cancelado,
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ativo => "ativo",
            Self::Inativo => "inativo",
            Self::Pendente => "pendente",
            Self::Cancelado => "cancelado",
        };
        f.write_str(s)
    }
}

/// A snapshot of a contract's template and stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractVersion {
    pub versao: u32,
    pub conteudo: String,
    #[serde(default)]
    pub variaveis: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_modificacao: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modificado_por: Option<String>,
}

/// A contract document. `conteudo` is the raw editor markup with its
/// placeholders; the rendered text is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<String>,

    pub titulo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,

    #[serde(default)]
    pub status: ContractStatus,

    pub conteudo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_vigencia: Option<DateTime<Utc>>,

    /// Values typed in by whoever authored the contract. These win over
    /// anything derived from the client or the contract itself.
    #[serde(default)]
    pub variaveis: BTreeMap<String, String>,

    #[serde(default = "default_versao")]
    pub versao: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub historico_versoes: Vec<ContractVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_versao() -> u32 {
    1
}

impl ContractRecord {
    pub fn new(titulo: String, conteudo: String) -> Self {
        Self {
            id: None,
            cliente_id: None,
            titulo,
            descricao: None,
            status: ContractStatus::default(),
            conteudo,
            data_vigencia: None,
            variaveis: BTreeMap::new(),
            versao: default_versao(),
            historico_versoes: Vec::new(),
            updated_at: None,
        }
    }

    /// Placeholders describing the contract itself.
    pub fn to_values(&self) -> ValueMap {
        let mut values = ValueMap::new();

        values.insert("contrato.titulo".to_string(), Some(self.titulo.clone()));
        values.insert("contrato.descricao".to_string(), self.descricao.clone());
        values.insert("contrato.status".to_string(), Some(self.status.to_string()));
        values.insert("contrato.versao".to_string(), Some(self.versao.to_string()));
        values.insert(
            "contrato.dataVigencia".to_string(),
            self.data_vigencia.map(|d| format_date(d.date_naive())),
        );
        values.insert(
            "numero_contrato".to_string(),
            self.id.as_ref().map(|id| format!("CONT-{}", id)),
        );

        values
    }

    /// Stored variables as placeholder values.
    pub fn stored_values(&self) -> ValueMap {
        self.variaveis
            .iter()
            .map(|(k, v)| (k.clone(), Some(v.clone())))
            .collect()
    }

    /// Renders the content using only the stored variables and the date.
    pub fn stored_render(&self, today: NaiveDate) -> String {
        let mut values = self.stored_values();
        values
            .entry(CURRENT_DATE_VARIABLE.to_string())
            .or_insert_with(|| Some(format_date(today)));

        let template = prepare_for_substitution(&self.conteudo);
        TemplateRenderer::with_date(today).render(&template, &values)
    }

    /// Replaces content and stored variables.
    ///
    /// When the content actually changes, the previous content is kept in
    /// the history and the version number goes up. Returns whether a new
    /// version was created.
    pub fn revise(
        &mut self,
        conteudo: String,
        variaveis: BTreeMap<String, String>,
        modified_at: DateTime<Utc>,
        modified_by: Option<String>,
    ) -> bool {
        let bumped = conteudo != self.conteudo;

        if bumped {
            let previous = ContractVersion {
                versao: self.versao,
                conteudo: std::mem::replace(&mut self.conteudo, conteudo),
                variaveis: self.variaveis.clone(),
                data_modificacao: Some(modified_at),
                modificado_por: modified_by,
            };
            self.historico_versoes.push(previous);
            self.versao += 1;
            info!("Contract '{}' revised to version {}", self.titulo, self.versao);
        }

        self.variaveis = variaveis;
        self.updated_at = Some(modified_at);
        bumped
    }

    /// The current version or one from the history.
    pub fn version(&self, versao: u32) -> Option<ContractVersion> {
        if versao == self.versao {
            return Some(ContractVersion {
                versao: self.versao,
                conteudo: self.conteudo.clone(),
                variaveis: self.variaveis.clone(),
                data_modificacao: self.updated_at,
                modificado_por: None,
            });
        }

        self.historico_versoes
            .iter()
            .find(|v| v.versao == versao)
            .cloned()
    }
}
