//! ORMDEF Command-Line Checker
//!
//! Loads a class definition document, runs the full validation pipeline and
//! prints what was loaded.

mod formatter;
mod summary;

use clap::Parser;
use formatter::OutputFormat;
use ormdef_core::{ClassDefCollection, ClassDefsLoader, DefinitionError, LoaderConfig};
use std::path::PathBuf;
use summary::ClassSummary;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// ORMDEF Command-Line Checker
#[derive(Parser, Debug)]
#[command(name = "ormdef")]
#[command(version, about = "Load and validate ORM class definition documents")]
pub struct Args {
    /// Class definition document
    pub file: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Fail on key properties no class declares instead of synthesizing them
    #[arg(long)]
    pub strict_keys: bool,

    /// Accept classes without an own or inherited primary key
    #[arg(long)]
    pub allow_missing_primary_key: bool,

    /// Describe a single class (`Assembly.Class` or a bare class name)
    #[arg(long)]
    pub class: Option<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}", .0.message())]
    Definition(#[from] DefinitionError),

    #[error("no class named '{0}'")]
    UnknownClass(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ormdef=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let formatter = formatter::create_formatter(args.format);

    match run(&args) {
        Ok(summaries) => println!("{}", formatter.format_classes(&summaries)),
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e.to_string()));
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<Vec<ClassSummary>, CliError> {
    debug!(path = %args.file.display(), "Reading class definitions");
    let xml = std::fs::read_to_string(&args.file).map_err(|source| CliError::Read {
        path: args.file.clone(),
        source,
    })?;

    let config = LoaderConfig::default()
        .with_strict_key_properties(args.strict_keys)
        .with_require_primary_key(!args.allow_missing_primary_key);
    let classes = ClassDefsLoader::new().with_config(config).load(&xml)?;

    match &args.class {
        Some(name) => {
            let class = find_class(&classes, name)
                .ok_or_else(|| CliError::UnknownClass(name.clone()))?;
            Ok(vec![ClassSummary::new(&classes, class)])
        }
        None => Ok(classes
            .iter()
            .map(|class| ClassSummary::new(&classes, class))
            .collect()),
    }
}

fn find_class<'a>(
    classes: &'a ClassDefCollection,
    name: &str,
) -> Option<&'a ormdef_core::ClassDef> {
    match name.rsplit_once('.') {
        Some((assembly, class_name)) => classes.find(assembly, class_name),
        None => classes.find_by_class_name(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<classes>
      <class name="Customer" assembly="Shop">
        <property name="CustomerID" type="Guid" />
        <primaryKey><prop name="CustomerID" /></primaryKey>
      </class>
    </classes>"#;

    #[test]
    fn test_args_parse_flags() {
        let args = Args::parse_from([
            "ormdef",
            "defs.xml",
            "--format",
            "json",
            "--strict-keys",
            "--class",
            "Shop.Customer",
        ]);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.strict_keys);
        assert!(!args.allow_missing_primary_key);
        assert_eq!(args.class.as_deref(), Some("Shop.Customer"));
    }

    #[test]
    fn test_find_class_qualified_and_bare() {
        let classes = ClassDefsLoader::new().load(DOC).unwrap();
        assert!(find_class(&classes, "Shop.Customer").is_some());
        assert!(find_class(&classes, "Customer").is_some());
        assert!(find_class(&classes, "Other.Customer").is_none());
    }

    #[test]
    fn test_definition_error_shows_bare_message() {
        let err: CliError = DefinitionError::semantic("class 'X' not found").into();
        assert_eq!(err.to_string(), "class 'X' not found");
    }
}
