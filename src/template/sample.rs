//! Preview values for contracts that are not yet bound to real data.

use crate::masks::{mask_cnpj, mask_telefone};
use crate::records::ClientRecord;
use crate::template::renderer::format_date;
use crate::template::ValueMap;
use chrono::{Datelike, Local, NaiveDate};
use log::debug;

struct Context<'a> {
    client: Option<&'a ClientRecord>,
    today: NaiveDate,
}

impl Context<'_> {
    fn client_field(&self, field: fn(&ClientRecord) -> Option<&str>) -> Option<String> {
        self.client
            .and_then(field)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

struct Rule {
    keywords: &'static [&'static str],
    value: fn(&Context<'_>) -> String,
}

/// Checked top to bottom, first keyword hit wins. The field-specific rules
/// sit above the generic `cliente`/`nome` one so that `cliente_cnpj` is a
/// tax id rather than a company name.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["cnpj"],
        value: cnpj,
    },
    Rule {
        keywords: &["email"],
        value: email,
    },
    Rule {
        keywords: &["telefone"],
        value: telefone,
    },
    Rule {
        keywords: &["endereco", "endereço"],
        value: endereco,
    },
    Rule {
        keywords: &["cliente", "nome"],
        value: company_name,
    },
    Rule {
        keywords: &["data"],
        value: current_date,
    },
    Rule {
        keywords: &["valor"],
        value: currency_zero,
    },
    Rule {
        keywords: &["numero", "número"],
        value: document_number,
    },
];

fn cnpj(ctx: &Context<'_>) -> String {
    ctx.client_field(|c| Some(c.cnpj.as_str()))
        .map(|v| mask_cnpj(&v))
        .unwrap_or_else(|| "00.000.000/0000-00".to_string())
}

fn email(ctx: &Context<'_>) -> String {
    ctx.client_field(|c| Some(c.email.as_str()))
        .unwrap_or_else(|| "email@exemplo.com".to_string())
}

fn telefone(ctx: &Context<'_>) -> String {
    ctx.client_field(|c| c.telefone.as_deref())
        .map(|v| mask_telefone(&v))
        .unwrap_or_else(|| "(00) 00000-0000".to_string())
}

fn endereco(ctx: &Context<'_>) -> String {
    ctx.client_field(|c| c.endereco.as_deref())
        .unwrap_or_else(|| "Endereço do Cliente".to_string())
}

fn company_name(ctx: &Context<'_>) -> String {
    ctx.client_field(|c| Some(c.razao_social.as_str()))
        .unwrap_or_else(|| "Nome do Cliente".to_string())
}

fn current_date(ctx: &Context<'_>) -> String {
    format_date(ctx.today)
}

fn currency_zero(_: &Context<'_>) -> String {
    "R$ 0,00".to_string()
}

fn document_number(ctx: &Context<'_>) -> String {
    format!("001/{}", ctx.today.year())
}

/// Generates plausible values for a contract preview.
#[derive(Debug, Clone)]
pub struct SampleData {
    today: NaiveDate,
}

impl SampleData {
    pub fn new() -> Self {
        Self::with_date(Local::now().date_naive())
    }

    pub fn with_date(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Builds one value per variable name.
    ///
    /// Names are matched case-insensitively by substring against a fixed,
    /// ordered rule list. Values from `client` are used when present and
    /// non-blank; otherwise a shaped default is produced. Names matching no
    /// rule are echoed back as `[name]`.
    pub fn synthesize<S: AsRef<str>>(
        &self,
        variables: &[S],
        client: Option<&ClientRecord>,
    ) -> ValueMap {
        let ctx = Context {
            client,
            today: self.today,
        };

        let mut values = ValueMap::new();
        for name in variables {
            let name = name.as_ref();
            let lower = name.to_lowercase();

            let value = match RULES
                .iter()
                .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
            {
                Some(rule) => (rule.value)(&ctx),
                None => format!("[{}]", name),
            };

            debug!("Sample value for '{}': {}", name, value);
            values.insert(name.to_string(), Some(value));
        }

        values
    }
}

impl Default for SampleData {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample values dated today.
pub fn synthesize<S: AsRef<str>>(variables: &[S], client: Option<&ClientRecord>) -> ValueMap {
    SampleData::new().synthesize(variables, client)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SampleData {
        SampleData::with_date(NaiveDate::from_ymd_opt(2025, 10, 24).unwrap())
    }

    fn value(map: &ValueMap, key: &str) -> String {
        map.get(key).cloned().flatten().unwrap()
    }

    #[test]
    fn test_defaults_without_client() {
        let names = [
            "cnpj",
            "email_contato",
            "telefone",
            "endereço_sede",
            "nome_cliente",
            "data_inicio",
            "valor_total",
            "numero_contrato",
            "foro",
        ];
        let map = sample().synthesize(&names, None);

        assert_eq!(value(&map, "cnpj"), "00.000.000/0000-00");
        assert_eq!(value(&map, "email_contato"), "email@exemplo.com");
        assert_eq!(value(&map, "telefone"), "(00) 00000-0000");
        assert_eq!(value(&map, "endereço_sede"), "Endereço do Cliente");
        assert_eq!(value(&map, "nome_cliente"), "Nome do Cliente");
        assert_eq!(value(&map, "data_inicio"), "24/10/2025");
        assert_eq!(value(&map, "valor_total"), "R$ 0,00");
        assert_eq!(value(&map, "numero_contrato"), "001/2025");
        assert_eq!(value(&map, "foro"), "[foro]");
        assert_eq!(map.len(), names.len());
    }

    #[test]
    fn test_case_insensitive() {
        let map = sample().synthesize(&["CNPJ_Contratante", "NÚMERO"], None);
        assert_eq!(value(&map, "CNPJ_Contratante"), "00.000.000/0000-00");
        assert_eq!(value(&map, "NÚMERO"), "001/2025");
    }

    #[test]
    fn test_cliente_cnpj_is_tax_id_and_deterministic() {
        let first = sample().synthesize(&["cliente_cnpj"], None);
        let second = sample().synthesize(&["cliente_cnpj"], None);
        assert_eq!(value(&first, "cliente_cnpj"), "00.000.000/0000-00");
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_function_matches_dated_synthesizer() {
        let values = synthesize(&["cliente_cnpj", "cliente_email"], None);
        assert_eq!(value(&values, "cliente_cnpj"), "00.000.000/0000-00");
        assert_eq!(value(&values, "cliente_email"), "email@exemplo.com");
        assert_eq!(values, synthesize(&["cliente_cnpj", "cliente_email"], None));
    }

    #[test]
    fn test_client_context_wins() {
        let client = ClientRecord {
            razao_social: "Tech Solutions Ltda".to_string(),
            cnpj: "12345678000190".to_string(),
            email: "contato@tech.com.br".to_string(),
            telefone: Some("11987654321".to_string()),
            endereco: None,
            ..ClientRecord::default()
        };
        let names = ["nome_cliente", "cnpj", "email", "telefone", "endereco"];
        let map = sample().synthesize(&names, Some(&client));

        assert_eq!(value(&map, "nome_cliente"), "Tech Solutions Ltda");
        assert_eq!(value(&map, "cnpj"), "12.345.678/0001-90");
        assert_eq!(value(&map, "email"), "contato@tech.com.br");
        assert_eq!(value(&map, "telefone"), "(11) 98765-4321");
        assert_eq!(value(&map, "endereco"), "Endereço do Cliente");
    }

    #[test]
    fn test_blank_client_field_falls_back() {
        let client = ClientRecord {
            razao_social: "   ".to_string(),
            ..ClientRecord::default()
        };
        let map = sample().synthesize(&["razao_nome"], Some(&client));
        assert_eq!(value(&map, "razao_nome"), "Nome do Cliente");
    }
}
