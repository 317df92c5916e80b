use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "contractgen")]
#[command(author, version, long_about = None)]
#[command(about = "Render contract documents from templates with {{variable}} placeholders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the variables used by a template
    Variables {
        /// Template file path
        #[arg(short, long)]
        template: String,

        /// Print the list as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Strip editor markup around variables, leaving bare {{name}} placeholders
    Normalize {
        /// Template file path
        #[arg(short, long)]
        template: String,

        /// Output file path
        #[arg(short, long)]
        output: String,
    },

    /// Render a template with sample values, optionally taken from a client
    Preview {
        /// Template file path
        #[arg(short, long)]
        template: String,

        /// Client JSON file used to fill known fields
        #[arg(short, long)]
        client: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// HTML-escape substituted values
        #[arg(long)]
        escape_html: bool,
    },

    /// Render a contract for a client
    Render {
        /// Contract JSON file (its content is the template)
        #[arg(short = 'k', long)]
        contract: String,

        /// Client JSON file
        #[arg(short, long)]
        client: String,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Use this template file instead of the contract's content
        #[arg(short, long)]
        template: Option<String>,

        /// JSON object file with extra values (null leaves a variable blank)
        #[arg(long)]
        values: Option<String>,

        /// Extra values in format KEY=VALUE (can be used multiple times)
        #[arg(short = 'f', long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,

        /// HTML-escape substituted values
        #[arg(long)]
        escape_html: bool,
    },

    /// Render one contract for every client in a JSON array
    Batch {
        /// Contract JSON file
        #[arg(short = 'k', long)]
        contract: String,

        /// JSON file with an array of clients
        #[arg(short, long)]
        clients: String,

        /// Output directory
        #[arg(short, long, default_value = "contratos")]
        output_dir: String,

        /// HTML-escape substituted values
        #[arg(long)]
        escape_html: bool,
    },

    /// Generate example client and contract JSON files
    Example {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output_dir: String,
    },

    /// Interactively create a client JSON file
    CreateClient {
        /// Output path for JSON file
        #[arg(short, long, default_value = "cliente.json")]
        output: String,
    },
}

/// Parse a single key-value pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
