//! Interface de linha de comando do jobsh baseada em clap.
//!
//! Define a struct [`Cli`] com as flags de inicialização (-h, -v, -p).
//! A ajuda automática do clap é desabilitada para que `-h` imprima a
//! mensagem de uso e termine com status 1.

use clap::Parser;

/// jobsh — Interpretador de comandos interativo com controle de jobs.
#[derive(Debug, Parser)]
#[command(name = "jobsh", disable_help_flag = true)]
pub struct Cli {
    /// Imprime a mensagem de uso e termina com status 1.
    #[arg(short = 'h')]
    pub show_usage: bool,

    /// Habilita diagnóstico adicional ao registrar jobs.
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Não emite o prompt de comando (útil para testes automatizados).
    #[arg(short = 'p')]
    pub no_prompt: bool,
}
