//! Minimal CLI: schema documents → (typescript | inspect)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::Config;
use crate::error::Error;
use crate::schema::SchemaDocument;
use crate::transform::SchemaTransformer;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate typed client form state from server-side validation rules
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// write the TypeScript module with one type + useForm constant per schema
    Generate(GenerateOut),
    /// print the per-field type mapping as JSON
    Inspect(InspectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// generator configuration (JSON); defaults apply when omitted
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// One or more schema documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// front-end provider: vue | react | svelte4 | svelte5 (overrides config)
    #[arg(long)]
    provider: Option<String>,

    /// output .ts file, `-` for stdout (overrides config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_config(&self) -> anyhow::Result<Config> {
        match self.config.as_ref() {
            Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display())),
            None => Ok(Config::default()),
        }
    }

    /// Read every input document and merge them, dropping excluded schemas.
    fn load_documents(&self, config: &Config) -> anyhow::Result<SchemaDocument> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut merged = SchemaDocument::default();
        for source_path in source_paths {
            log::info!("reading {}", source_path.display());
            let document = SchemaDocument::from_file(&source_path)?;
            merged.merge(document);
        }
        merged.exclude(&config.exclude);
        Ok(merged)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let mut config = target.input_settings.load_config()?;
                if let Some(provider) = target.provider.as_ref() {
                    config.front_end_provider = provider.clone();
                }
                // fail before any input is read
                let provider = config.provider()?;

                let document = target.input_settings.load_documents(&config)?;
                let catalog = document.catalog();
                let results = SchemaTransformer::new(&config, &catalog).transform_all(&document.schemas);
                let module_src = crate::writer::render_module(provider, &results);

                let out = target.out.as_ref().unwrap_or(&config.output_file_path);
                if out.as_os_str() == "-" {
                    print!("{module_src}");
                } else {
                    write_output(out, &module_src)?;
                    eprintln!(
                        "{} {} form(s) for {provider} → {}",
                        "generated".green().bold(),
                        results.len(),
                        out.display()
                    );
                }
            }
            Command::Inspect(target) => {
                let config = target.input_settings.load_config()?;
                let document = target.input_settings.load_documents(&config)?;
                let catalog = document.catalog();
                let report = SchemaTransformer::new(&config, &catalog).report(&document.schemas);
                let report_src = serde_json::to_string_pretty(&report)?;
                match target.out.as_ref() {
                    Some(out) => write_output(out, &report_src)?,
                    None => println!("{report_src}"),
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("writing {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> crate::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                let path = entry.map_err(|e| Error::Io {
                    path: e.path().to_path_buf(),
                    source: e.into_error(),
                })?;
                matched_any = true;
                out.push(path);
            }
            if !matched_any {
                return Err(Error::NoInputMatched(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["schemas/a.json", "b.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("schemas/a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        let err = resolve_file_path_patterns(["/nonexistent-formgen-dir/*.json"]).unwrap_err();
        assert!(matches!(err, Error::NoInputMatched(_)));
    }

    #[test]
    fn generate_arguments_parse() {
        let cli = CommandLineInterface::try_parse_from([
            "formgen", "generate", "-i", "a.json", "b/*.json", "--provider", "svelte5", "-o", "-",
        ])
        .unwrap();
        match cli.cmd {
            Command::Generate(target) => {
                assert_eq!(target.input_settings.input, vec!["a.json", "b/*.json"]);
                assert_eq!(target.provider.as_deref(), Some("svelte5"));
                assert_eq!(target.out, Some(PathBuf::from("-")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
