use anyhow::{bail, Context, Result};
use clap::Parser;

use linefile::cli::{CliArgs, Command, ConfigAction, ReadAllArgs, ReadAllMode};
use linefile::{Separator, TextFileError, TextFiles, TextFilesConfig};

fn main() -> Result<()> {
    linefile::tracing::init();

    let args = CliArgs::parse();
    let config = TextFilesConfig::load();

    if let Command::Config { action } = &args.command {
        return run_config(action, &config);
    }

    let files = TextFiles::new(&config)
        .with_context(|| format!("Invalid default separator '{}'", config.default_separator))?;

    run(&files, args.command)
}

fn run(files: &TextFiles, command: Command) -> Result<()> {
    match command {
        Command::AppendLine { path, line } => {
            if !files.append_line(&path, &line) {
                bail!("Failed to append line to {}", path.display());
            }
        }
        Command::AppendLines { path, lines } => {
            if !files.append_lines(&path, &lines) {
                bail!("Failed to append lines to {}", path.display());
            }
        }
        Command::AppendText {
            path,
            text,
            separator,
        } => {
            let separator = match separator {
                Some(pattern) => Separator::new(&pattern)?,
                None => files.default_separator().clone(),
            };
            files
                .try_append_delimited_text(&path, &text, &separator)
                .with_context(|| format!("Failed to append text to {}", path.display()))?;
        }
        Command::ReadLine { path, index } => {
            println!("{}", files.read_line(&path, index));
        }
        Command::ReadAll(args) => read_all(files, &args)?,
        Command::Config { action } => {
            bail!("config {:?} is handled before text file commands", action)
        }
    }

    Ok(())
}

fn read_all(files: &TextFiles, args: &ReadAllArgs) -> Result<()> {
    match args.mode() {
        ReadAllMode::Text => println!("{}", files.read_all_as_string(&args.path)),
        ReadAllMode::Lines => {
            for line in files.read_all_as_lines(&args.path) {
                println!("{}", line);
            }
        }
        ReadAllMode::Tokens(pattern) => {
            let separator = Separator::new(pattern)?;
            let tokens = match files.try_read_all_as_tokens(&args.path, &separator) {
                Ok(tokens) => tokens,
                Err(TextFileError::NotFound { .. }) => Vec::new(),
                Err(e) => return Err(e.into()),
            };
            for token in tokens {
                println!("{}", token);
            }
        }
    }
    Ok(())
}

fn run_config(action: &ConfigAction, config: &TextFilesConfig) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = linefile::config_paths::config_file()
                .context("No config directory available")?;
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            let path = TextFilesConfig::default().save()?;
            println!("Wrote {}", path.display());
        }
        ConfigAction::Show => {
            match linefile::config_paths::config_file() {
                Some(path) => println!("# {}", path.display()),
                None => println!("# no config directory"),
            }
            print!("{}", serde_yaml::to_string(config)?);
        }
    }
    Ok(())
}
