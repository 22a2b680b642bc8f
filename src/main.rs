use clap::{Parser as ClapParser, Subcommand};
use minilang_compiler::config::Config;
use minilang_compiler::error::CompilerError;
use minilang_compiler::interpreter::format_number;
use minilang_compiler::{run, RunOutcome};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(author, version, about = "MiniLang Compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a MiniLang script (a path, or a name resolved in the scripts directory)
    Run {
        script: String,
    },
    /// Evaluate an inline MiniLang snippet
    Eval {
        code: String,
        /// Emit the result as a JSON object with an "output" or "error" field
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive session
    Repl,
    /// Manage MiniLang configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Initialize a new configuration file with defaults
    Init,
}

#[derive(Serialize)]
struct EvalResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn render_outcome(outcome: RunOutcome) -> String {
    match outcome {
        RunOutcome::Value(value) => format_number(value),
        RunOutcome::Printed(lines) => {
            if lines.is_empty() {
                String::from("Code executed successfully")
            } else {
                lines.join("\n")
            }
        }
    }
}

fn load_script(path: &PathBuf, config: &Config) -> Result<String, CompilerError> {
    if !path.exists() {
        return Err(CompilerError::FileNotFound(format!(
            "Script not found: {}\n\nTo fix this:\n1. Pass a path to a .mini file\n2. Or add the script to {} and run it by name\n3. Or set MLC_SCRIPTS_DIR in your environment",
            path.display(),
            config.scripts_dir.display()
        )));
    }

    fs::read_to_string(path).map_err(CompilerError::IO)
}

fn run_script(script: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.resolve_script(script);
    let source = match load_script(&path, config) {
        Ok(source) => source,
        Err(CompilerError::FileNotFound(msg)) => {
            println!("Error: {}", msg);
            println!("\nCurrent configuration:");
            println!("  Environment: {}", config.env_name);
            println!("  Scripts directory: {}", config.scripts_dir.display());
            return Ok(());
        }
        Err(e) => return Err(Box::new(e)),
    };

    match run(&source) {
        Ok(outcome) => println!("{}", render_outcome(outcome)),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

fn eval_code(code: &str, json: bool) {
    let response = match run(code) {
        Ok(outcome) => EvalResponse {
            output: Some(render_outcome(outcome)),
            error: None,
        },
        Err(e) => EvalResponse {
            output: None,
            error: Some(e.to_string()),
        },
    };

    if json {
        match serde_json::to_string(&response) {
            Ok(body) => println!("{}", body),
            Err(e) => println!("{{\"error\": \"{}\"}}", e),
        }
        return;
    }

    match response {
        EvalResponse {
            output: Some(output),
            ..
        } => println!("{}", output),
        EvalResponse {
            error: Some(error), ..
        } => println!("Error: {}", error),
        _ => {}
    }
}

// Every line evaluates in a fresh interpreter; no state carries across lines.
fn repl() -> io::Result<()> {
    println!("MiniLang Compiler");
    println!("Type your code (Ctrl+C to exit)");
    println!("Examples:");
    println!("x = 5;");
    println!("print 2 + 3 * 4;");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let code = line.trim();
        if code.is_empty() {
            continue;
        }

        match run(code) {
            Ok(RunOutcome::Value(value)) => println!("{}", format_number(value)),
            Ok(RunOutcome::Printed(lines)) => {
                for printed in lines {
                    println!("{}", printed);
                }
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Run { script } => {
            run_script(&script, &config)?;
        }
        Commands::Eval { code, json } => {
            eval_code(&code, json);
        }
        Commands::Repl => {
            repl()?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                println!("Environment: {}", config.env_name);
                println!("Scripts directory: {}", config.scripts_dir.display());
                println!("Config file: {}", Config::get_config_path().display());
            }
            ConfigCommands::Init => {
                let config_path = Config::get_config_path();
                if config_path.exists() {
                    println!("Config file already exists at: {}", config_path.display());
                    println!("Remove the file to reinitialize it.");
                } else {
                    config.save()?;
                    println!("Initialized new config file at: {}", config_path.display());
                }
            }
        },
    }

    Ok(())
}
