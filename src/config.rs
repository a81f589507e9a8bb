//! Configuração do jobsh carregada a partir de `jobsh.toml`.
//!
//! A struct [`ShellConfig`] contém os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `JOBSH_PROMPT` tem precedência sobre o arquivo.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Configuração de nível superior carregada de `jobsh.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// Texto do prompt interativo.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Diagnóstico adicional ao registrar jobs (a flag `-v` força true).
    #[serde(default)]
    pub verbose: bool,
}

// Valor padrão do prompt.
fn default_prompt() -> String {
    "jobsh> ".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            verbose: false,
        }
    }
}

impl ShellConfig {
    /// Carrega a configuração de `jobsh.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("jobsh.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<ShellConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo.
        if let Ok(prompt) = std::env::var("JOBSH_PROMPT")
            && !prompt.is_empty()
        {
            config.prompt = prompt;
        }

        Ok(config)
    }
}
