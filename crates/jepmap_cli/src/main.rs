//! Command-line entry point.
//!
//! # Responsibility
//! - Reload saved JEP records, run finalization with the given override rules
//!   and print the resulting release-line memberships.
//! - Optionally run one corpus search over the reloaded records.
//!
//! Usage: `jepmap_cli <records-dir> --rules FILE [--config FILE] [--search QUERY]`
//!
//! The rules file is required.

use jepmap_core::{
    default_log_level, init_stderr_logging, load_records, CatalogService, CorpusIndex,
    EngineConfig, EntityStore, OverrideRules, SearchQuery,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str =
    "usage: jepmap_cli <records-dir> --rules FILE [--config FILE] [--search QUERY]";

#[derive(Debug, Default)]
struct Args {
    records_dir: PathBuf,
    rules: PathBuf,
    config: Option<PathBuf>,
    search: Option<String>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut records_dir = None;
    let mut rules = None;

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--rules" => rules = Some(PathBuf::from(flag_value(&mut raw, "--rules")?)),
            "--config" => args.config = Some(flag_value(&mut raw, "--config")?.into()),
            "--search" => args.search = Some(flag_value(&mut raw, "--search")?),
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            _ if records_dir.is_none() => records_dir = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument `{arg}`")),
        }
    }

    args.records_dir = records_dir.ok_or("missing <records-dir>")?;
    args.rules = rules.ok_or("missing `--rules FILE`")?;
    Ok(args)
}

fn flag_value(raw: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    raw.next().ok_or_else(|| format!("`{flag}` needs a value"))
}

fn run(args: Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path).map_err(|err| err.to_string())?,
        None => EngineConfig::default(),
    };
    let rules = OverrideRules::load(&args.rules).map_err(|err| err.to_string())?;

    let mut store = EntityStore::new();
    for item in load_records(&args.records_dir).map_err(|err| err.to_string())? {
        store.put_item(item);
    }

    let service = CatalogService::new(rules, config);
    service.register_release_lines(&mut store);
    let report = service.finalize(&mut store);

    println!(
        "jeps={} groups={} memberships_added={} suppressed={} removed={}",
        store.item_count(),
        store.group_count(),
        report.groups.added,
        report.groups.suppressed,
        report.groups.removed
    );
    for group in store.groups().filter(|group| group.member_count() > 0) {
        let members: Vec<String> = group
            .members()
            .iter()
            .map(|member| member.number.to_string())
            .collect();
        println!("{} ({}): {}", group.id(), group.name, members.join(" "));
    }

    if let Some(text) = &args.search {
        let corpus = CorpusIndex::from_store(&store, service.config().search.clone());
        let query = SearchQuery::new(text);
        for hit in corpus.search(&query) {
            println!("JEP {}: {}", hit.number, hit.name);
            for snippet in &hit.snippets {
                println!("    ...{snippet}...");
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = init_stderr_logging(default_log_level()) {
        eprintln!("logging disabled: {err}");
    }

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_failed module=cli status=error error={err}");
            eprintln!("jepmap_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_args;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_positional_dir_and_flags() {
        let parsed = parse_args(args(&["records", "--rules", "bad.properties", "--search", "loom"]))
            .unwrap();
        assert_eq!(parsed.records_dir, PathBuf::from("records"));
        assert_eq!(parsed.rules, PathBuf::from("bad.properties"));
        assert_eq!(parsed.search.as_deref(), Some("loom"));
        assert!(parsed.config.is_none());
    }

    #[test]
    fn rejects_missing_dir_and_dangling_flag() {
        assert!(parse_args(args(&[])).unwrap_err().contains("records-dir"));
        assert!(parse_args(args(&["records"])).unwrap_err().contains("--rules"));
        assert!(parse_args(args(&["records", "--rules"])).unwrap_err().contains("needs a value"));
        assert!(parse_args(args(&["records", "--verbose"])).is_err());
    }
}
