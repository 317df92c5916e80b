use crate::error::{ContractError, Result};
use crate::template::{
    extract_variables, has_variables, prepare_for_substitution, TemplateRenderer, ValueMap,
};
use log::{debug, info, warn};
use std::path::Path;

/// A contract template loaded from disk, already normalized.
pub struct ContractDocument {
    path: String,
    template: String,
}

impl ContractDocument {
    /// Opens a template file (editor HTML or plain text).
    pub fn open(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(ContractError::TemplateNotFound(path.to_string()));
        }

        let markup = std::fs::read_to_string(path)?;
        Ok(Self::from_markup(path, &markup))
    }

    /// Wraps markup that did not come from a file, e.g. a stored contract.
    pub fn from_markup(origin: &str, markup: &str) -> Self {
        debug!("Normalizing template from {}", origin);
        let template = prepare_for_substitution(markup);
        if !has_variables(&template) {
            warn!("Template {} contains no placeholders", origin);
        }

        Self {
            path: origin.to_string(),
            template,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn variables(&self) -> Vec<String> {
        extract_variables(&self.template)
    }

    pub fn render(&self, renderer: &TemplateRenderer, values: &ValueMap) -> String {
        renderer.render(&self.template, values)
    }

    /// Renders the document and writes the result to `output_path`.
    pub fn fill_and_save(
        &self,
        output_path: &str,
        renderer: &TemplateRenderer,
        values: &ValueMap,
    ) -> Result<()> {
        info!("Processing template: {}", self.path);
        info!("Output will be written to: {}", output_path);

        if let Some(parent) = Path::new(output_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let rendered = self.render(renderer, values);
        std::fs::write(output_path, rendered)?;

        info!("Successfully created: {}", output_path);
        Ok(())
    }

    /// Renders one file per `(filename, values)` pair into `output_dir`.
    pub fn batch_fill(
        &self,
        output_dir: &str,
        renderer: &TemplateRenderer,
        batch_data: Vec<(String, ValueMap)>,
    ) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut created_files = Vec::new();

        for (filename, values) in batch_data {
            let output_path = Path::new(output_dir)
                .join(&filename)
                .to_string_lossy()
                .into_owned();
            self.fill_and_save(&output_path, renderer, &values)?;
            created_files.push(output_path);
        }

        Ok(created_files)
    }
}
