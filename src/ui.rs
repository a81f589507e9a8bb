//! Saída de terminal do jobsh — prompt e mensagem de uso.
//!
//! Usa a crate `console` para estilizar o prompt quando a saída é um
//! terminal. As mensagens de formato fixo (relatórios de jobs, erros de
//! bg/fg) são impressas sem estilo pelos próprios módulos.

use std::io::{Write, stdout};

use console::Style;

/// Prompt interativo, com flush garantido antes da leitura da próxima linha.
pub struct Prompt {
    text: String,
    style: Style,
}

impl Prompt {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: Style::new().cyan().for_stdout(),
        }
    }

    pub fn show(&self) {
        print!("{}", self.style.apply_to(&self.text));
        let _ = stdout().flush();
    }
}

/// Imprime a mensagem de uso e termina com status 1. Também é o destino
/// de flags desconhecidas.
pub fn usage() -> ! {
    println!("Usage: jobsh [-hvp]");
    println!("   -h   print this message");
    println!("   -v   print additional diagnostic information");
    println!("   -p   do not emit a command prompt");
    std::process::exit(1);
}
