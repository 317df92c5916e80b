use crate::error::Result;
use crate::masks::{mask_cep, mask_cnpj, mask_telefone, unmask};
use crate::records::ClientRecord;
use std::io::{self, BufRead, Write};

/// Reads one trimmed line after printing `prompt`.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Like [`read_line`], empty input is `None`.
fn read_optional_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    let line = read_line(input, out, prompt)?;
    Ok(if line.is_empty() { None } else { Some(line) })
}

/// Asks for each client field. Returns `None` if a required field is left
/// empty.
pub fn prompt_client<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<ClientRecord>> {
    writeln!(out, "Cadastro de cliente")?;
    writeln!(out, "-------------------")?;

    let razao_social = read_line(input, out, "Razão social: ")?;
    if razao_social.is_empty() {
        writeln!(out, "Razão social não pode ficar vazia.")?;
        return Ok(None);
    }

    let cnpj = read_line(input, out, "CNPJ: ")?;
    if unmask(&cnpj).is_empty() {
        writeln!(out, "CNPJ não pode ficar vazio.")?;
        return Ok(None);
    }

    let email = read_line(input, out, "E-mail: ")?;
    if email.is_empty() {
        writeln!(out, "E-mail não pode ficar vazio.")?;
        return Ok(None);
    }

    let telefone = read_optional_line(input, out, "Telefone (opcional): ")?;

    let endereco = read_optional_line(input, out, "Endereço (opcional): ")?;
    let endereco = match endereco {
        Some(street) => match read_optional_line(input, out, "CEP (opcional): ")? {
            Some(cep) => Some(format!("{}, CEP {}", street, mask_cep(&cep))),
            None => Some(street),
        },
        None => None,
    };

    let mut client = ClientRecord::new(razao_social, mask_cnpj(&cnpj), email.to_lowercase());
    client.telefone = telefone.map(|t| mask_telefone(&t));
    client.endereco = endereco;

    Ok(Some(client))
}

/// Interactively creates a client JSON file on stdin/stdout.
pub fn create_client_interactive(output_path: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let Some(client) = prompt_client(&mut input, &mut out)? else {
        return Ok(());
    };

    let json = serde_json::to_string_pretty(&client)?;
    std::fs::write(output_path, json)?;

    println!();
    println!("Arquivo: {}", output_path);
    println!("Cliente: {} ({})", client.razao_social, client.cnpj);
    println!();
    println!("Próximo passo:");
    println!("   contractgen render -k <contrato.json> -c {} -o contrato.html", output_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_full_client() {
        let mut input = Cursor::new(
            "ACME Ltda\n12345678000190\nJuridico@ACME.com.br\n11987654321\nAv. Paulista, 1000\n01310100\n",
        );
        let mut out = Vec::new();

        let client = prompt_client(&mut input, &mut out).unwrap().unwrap();
        assert_eq!(client.razao_social, "ACME Ltda");
        assert_eq!(client.cnpj, "12.345.678/0001-90");
        assert_eq!(client.email, "juridico@acme.com.br");
        assert_eq!(client.telefone.as_deref(), Some("(11) 98765-4321"));
        assert_eq!(client.endereco.as_deref(), Some("Av. Paulista, 1000, CEP 01310-100"));
    }

    #[test]
    fn test_prompt_optional_fields_skipped() {
        let mut input = Cursor::new("ACME Ltda\n12345678000190\na@b.com\n\n\n");
        let mut out = Vec::new();

        let client = prompt_client(&mut input, &mut out).unwrap().unwrap();
        assert_eq!(client.telefone, None);
        assert_eq!(client.endereco, None);
    }

    #[test]
    fn test_prompt_missing_required_field() {
        let mut input = Cursor::new("\n");
        let mut out = Vec::new();

        assert!(prompt_client(&mut input, &mut out).unwrap().is_none());
        assert!(String::from_utf8(out).unwrap().contains("Razão social"));
    }
}
