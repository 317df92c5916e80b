use clap::Parser;
use contractgen::template::values_from_json;
use contractgen::{
    final_values, ClientRecord, Cli, Commands, ContractDocument, ContractError, ContractRecord,
    Escape, Result, SampleData, TemplateRenderer,
};
use log::{error, info};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Variables { template, json } => {
            let doc = ContractDocument::open(&template)?;
            let variables = doc.variables();
            info!("Found {} variable(s) in {}", variables.len(), template);

            if json {
                println!("{}", serde_json::to_string_pretty(&variables)?);
            } else {
                for name in variables {
                    println!("{}", name);
                }
            }
        }

        Commands::Normalize { template, output } => {
            let doc = ContractDocument::open(&template)?;
            std::fs::write(&output, doc.template())?;
            println!("✓ Normalized template written: {}", output);
        }

        Commands::Preview {
            template,
            client,
            output,
            escape_html,
        } => {
            info!("Rendering preview with sample data");
            preview(&template, client.as_deref(), &output, escape(escape_html))?;
            println!("✓ Preview created: {}", output);
        }

        Commands::Render {
            contract,
            client,
            output,
            template,
            values,
            fields,
            escape_html,
        } => {
            info!("Rendering contract for client");
            render_single(
                &contract,
                &client,
                &output,
                template.as_deref(),
                values.as_deref(),
                fields,
                escape(escape_html),
            )?;
            println!("✓ Contract created: {}", output);
        }

        Commands::Batch {
            contract,
            clients,
            output_dir,
            escape_html,
        } => {
            info!("Starting batch processing");
            let count = render_batch(&contract, &clients, &output_dir, escape(escape_html))?;
            println!("✓ Created {} contracts in {}", count, output_dir);
        }

        Commands::Example { output_dir } => {
            info!("Generating example JSON");
            generate_example(&output_dir)?;
            println!("✓ Example files created in {}", output_dir);
        }

        Commands::CreateClient { output } => {
            contractgen::interactive::create_client_interactive(&output)?;
        }
    }

    Ok(())
}

fn escape(html: bool) -> Escape {
    if html {
        Escape::Html
    } else {
        Escape::None
    }
}

fn preview(template: &str, client: Option<&str>, output: &str, escape: Escape) -> Result<()> {
    let doc = ContractDocument::open(template)?;
    let client = client.map(ClientRecord::from_json_file).transpose()?;

    let renderer = TemplateRenderer::new().escape(escape);
    let values =
        SampleData::with_date(renderer.today()).synthesize(&doc.variables(), client.as_ref());

    doc.fill_and_save(output, &renderer, &values)
}

fn render_single(
    contract_path: &str,
    client_path: &str,
    output: &str,
    template: Option<&str>,
    values_path: Option<&str>,
    fields: Vec<(String, String)>,
    escape: Escape,
) -> Result<()> {
    let contract = ContractRecord::from_json_file(contract_path)?;
    let client = ClientRecord::from_json_file(client_path)?;

    let doc = match template {
        Some(path) => ContractDocument::open(path)?,
        None => ContractDocument::from_markup(contract_path, &contract.conteudo),
    };

    let renderer = TemplateRenderer::new().escape(escape);
    let mut values = final_values(&client, &contract, renderer.today());

    if let Some(path) = values_path {
        let content = std::fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&content)?;
        if !json.is_object() {
            return Err(ContractError::invalid_record(path, "expected a JSON object"));
        }
        values.extend(values_from_json(&json));
    }

    for (key, value) in fields {
        info!("Adding field: {} = {}", key, value);
        values.insert(key, Some(value));
    }

    doc.fill_and_save(output, &renderer, &values)
}

fn render_batch(
    contract_path: &str,
    clients_path: &str,
    output_dir: &str,
    escape: Escape,
) -> Result<usize> {
    let contract = ContractRecord::from_json_file(contract_path)?;
    let clients = ClientRecord::batch_from_json_file(clients_path)?;

    if clients.is_empty() {
        return Err(ContractError::invalid_record(clients_path, "no clients in batch file"));
    }

    let doc = ContractDocument::from_markup(contract_path, &contract.conteudo);
    let renderer = TemplateRenderer::new().escape(escape);
    let title = sanitize_filename(&contract.titulo);

    let batch = clients
        .iter()
        .map(|client| {
            let filename = format!("{}_{}.html", sanitize_filename(&client.razao_social), title);
            (filename, final_values(client, &contract, renderer.today()))
        })
        .collect();

    let created = doc.batch_fill(output_dir, &renderer, batch)?;
    for (idx, path) in created.iter().enumerate() {
        info!("Created [{}] -> {}", idx, path);
    }

    Ok(created.len())
}

fn generate_example(output_dir: &str) -> Result<()> {
    let client = serde_json::json!({
        "razaoSocial": "Tech Solutions Ltda",
        "cnpj": "12.345.678/0001-90",
        "email": "contato@techsolutions.com.br",
        "telefone": "(11) 98765-4321",
        "endereco": "Av. Paulista, 1000 - São Paulo/SP"
    });

    let contract = serde_json::json!({
        "id": "2025-001",
        "titulo": "Contrato de Prestação de Serviços",
        "status": "ativo",
        "conteudo": concat!(
            "<h1>CONTRATO DE PRESTAÇÃO DE SERVIÇOS</h1>",
            "<p>Este contrato é firmado entre ",
            "<span data-type=\"variable\" data-id=\"nome_cliente\" data-label=\"nome_cliente\">{{nome_cliente}}</span>",
            ", inscrito no CNPJ sob o nº ",
            "<span data-type=\"variable\" data-id=\"cnpj\" data-label=\"cnpj\">{{cnpj}}</span>",
            ", doravante denominado CONTRATANTE.</p>",
            "<p>O valor total do contrato é de {{valor_contrato}}, a ser pago até {{data_pagamento}}.</p>",
            "<p>São Paulo, {{data_atual}}.</p>"
        ),
        "variaveis": {
            "valor_contrato": "R$ 50.000,00",
            "data_pagamento": "30/11/2025"
        }
    });

    std::fs::create_dir_all(output_dir)?;
    let dir = Path::new(output_dir);
    std::fs::write(dir.join("cliente.json"), serde_json::to_string_pretty(&client)?)?;
    std::fs::write(dir.join("contrato.json"), serde_json::to_string_pretty(&contract)?)?;

    Ok(())
}

fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            ' ' => '_',
            'á' | 'à' | 'â' | 'ã' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' => 'A',
            'é' | 'ê' => 'e',
            'É' | 'Ê' => 'E',
            'í' => 'i',
            'Í' => 'I',
            'ó' | 'ô' | 'õ' => 'o',
            'Ó' | 'Ô' | 'Õ' => 'O',
            'ú' | 'ü' => 'u',
            'Ú' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Tech Solutions Ltda"), "Tech_Solutions_Ltda");
        assert_eq!(sanitize_filename("Prestação/Serviços"), "Prestacao_Servicos");
        assert_eq!(sanitize_filename("Açaí & Cia"), "Acai___Cia");
    }

    #[test]
    fn test_example_files_load() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        generate_example(out).unwrap();

        let client_path = dir.path().join("cliente.json");
        let contract_path = dir.path().join("contrato.json");
        let client = ClientRecord::from_json_file(client_path.to_str().unwrap()).unwrap();
        let contract = ContractRecord::from_json_file(contract_path.to_str().unwrap()).unwrap();

        let doc = ContractDocument::from_markup("example", &contract.conteudo);
        assert_eq!(
            doc.variables(),
            vec!["nome_cliente", "cnpj", "valor_contrato", "data_pagamento", "data_atual"]
        );

        let renderer = TemplateRenderer::new();
        let rendered = doc.render(&renderer, &final_values(&client, &contract, renderer.today()));
        assert!(rendered.contains("Este contrato é firmado entre Tech Solutions Ltda"));
        assert!(rendered.contains("R$ 50.000,00"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_render_batch() {
        let dir = tempfile::tempdir().unwrap();
        let contract_path = dir.path().join("contrato.json");
        let clients_path = dir.path().join("clientes.json");
        std::fs::write(
            &contract_path,
            r#"{"titulo": "Serviços", "conteudo": "<p>{{nome_cliente}} - {{cnpj}}</p>"}"#,
        )
        .unwrap();
        std::fs::write(
            &clients_path,
            r#"[
                {"razaoSocial": "ACME", "cnpj": "12345678000190", "email": "a@acme.com"},
                {"razaoSocial": "Beta SA", "cnpj": "11222333000181", "email": "b@beta.com"}
            ]"#,
        )
        .unwrap();

        let out_dir = dir.path().join("out");
        let count = render_batch(
            contract_path.to_str().unwrap(),
            clients_path.to_str().unwrap(),
            out_dir.to_str().unwrap(),
            Escape::None,
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            std::fs::read_to_string(out_dir.join("Beta_SA_Servicos.html")).unwrap(),
            "<p>Beta SA - 11.222.333/0001-81</p>"
        );
    }
}
