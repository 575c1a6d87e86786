use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use bench_api::DataFormat;
use bench_harness::ReportFormat;

use super::error::SerbenchError;

pub const DEFAULT_CONFIG: &str = "serbench.toml";
pub const DEFAULT_INPUT: &str = "json_init.json";

// ═══════════════════════════════════════════════════════════════
//  CLI
// ═══════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(name = "serbench", version, about = "Бенчмарк форматов сериализации")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Прогнать датасет через все форматы
    Run(RunArgs),
    /// Сгенерировать входной датасет
    Generate(GenArgs),
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Путь к serbench.toml
    #[arg(long, default_value = DEFAULT_CONFIG, env = "SERBENCH_CONFIG")]
    pub config: String,

    /// Входной JSON документ ({"tests": [...]})
    #[arg(long)]
    pub input: Option<String>,

    /// Форматы через запятую (native,json,yaml,msgpack,protobuf). Порядок прогона фиксирован
    #[arg(long = "format", value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Проверить round-trip после замеров (не входит во время)
    #[arg(long)]
    pub verify: bool,

    /// Вывод: text | json | both
    #[arg(long)]
    pub report: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct GenArgs {
    /// Путь к serbench.toml
    #[arg(long, default_value = DEFAULT_CONFIG, env = "SERBENCH_CONFIG")]
    pub config: String,

    /// Куда записать датасет
    #[arg(long)]
    pub output: Option<String>,

    /// Количество записей
    #[arg(long)]
    pub records: Option<usize>,

    /// Длина имён и ключей
    #[arg(long)]
    pub name_len: Option<usize>,

    /// Элементов maps в каждой записи
    #[arg(long)]
    pub maps: Option<usize>,

    /// Верхняя граница (не включительно) для id и значений maps
    #[arg(long)]
    pub max_value: Option<u64>,

    /// Seed для PRNG (0 = текущее время)
    #[arg(long)]
    pub seed: Option<u64>,
}

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub input: Option<String>,
    pub formats: Option<Vec<DataFormat>>,
    pub verify: Option<bool>,
    pub report: Option<ReportFormat>,
    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateConfig {
    pub output: Option<String>,
    pub records: Option<usize>,
    pub name_len: Option<usize>,
    pub maps: Option<usize>,
    pub max_value: Option<u64>,
    pub seed: Option<u64>,
}

pub fn load_config(path: &str) -> Result<Config, SerbenchError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SerbenchError::Config(format!("cannot read config {path}: {e}")))?;
    toml::from_str(&content).map_err(|e| SerbenchError::Config(format!("bad config {path}: {e}")))
}

/// Missing file at `path` means defaults; a present but broken file is an error.
fn load_or_default(path: &str) -> Result<Config, SerbenchError> {
    match load_config(path) {
        Ok(c) => Ok(c),
        Err(e) => {
            if std::path::Path::new(path).exists() {
                return Err(e);
            }
            tracing::debug!(path, "no config file, using defaults");
            Ok(Config::default())
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Итоговые настройки `run` после мержа: defaults < serbench.toml < env/CLI
#[derive(Debug)]
pub struct RunEffective {
    pub input: String,
    /// Уникальные, в порядке прогона.
    pub formats: Vec<DataFormat>,
    pub verify: bool,
    pub report: ReportFormat,
}

impl RunEffective {
    pub fn new(args: &RunArgs) -> Result<Self, SerbenchError> {
        let cfg = load_or_default(&args.config)?;

        let formats = if !args.formats.is_empty() {
            parse_formats(&args.formats)?
        } else {
            match cfg.formats {
                Some(list) => normalize(list)?,
                None => DataFormat::ALL.to_vec(),
            }
        };

        let report = match args.report.as_deref() {
            Some(r) => ReportFormat::parse(r)?,
            None => cfg.report.unwrap_or_default(),
        };

        Ok(Self {
            input: args.input.clone().or(cfg.input).unwrap_or_else(|| DEFAULT_INPUT.to_string()),
            formats,
            verify: args.verify || cfg.verify.unwrap_or(false),
            report,
        })
    }
}

fn parse_formats(names: &[String]) -> Result<Vec<DataFormat>, SerbenchError> {
    let formats = names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .map(|n| DataFormat::parse(n))
        .collect::<Result<Vec<_>, _>>()?;
    normalize(formats)
}

/// Benchmark order, no duplicates, at least one format.
fn normalize(mut formats: Vec<DataFormat>) -> Result<Vec<DataFormat>, SerbenchError> {
    if formats.is_empty() {
        return Err(SerbenchError::Config("no formats selected".into()));
    }
    formats.sort();
    formats.dedup();
    Ok(formats)
}

/// Итоговые настройки `generate`.
#[derive(Debug)]
pub struct GenEffective {
    pub output: String,
    pub records: usize,
    pub name_len: usize,
    pub maps: usize,
    pub max_value: u64,
    pub seed: u64,
}

impl GenEffective {
    pub fn new(args: &GenArgs) -> Result<Self, SerbenchError> {
        let cfg = load_or_default(&args.config)?.generate;

        let eff = Self {
            output: args.output.clone().or(cfg.output).unwrap_or_else(|| DEFAULT_INPUT.to_string()),
            records: args.records.or(cfg.records).unwrap_or(10_000),
            name_len: args.name_len.or(cfg.name_len).unwrap_or(30),
            maps: args.maps.or(cfg.maps).unwrap_or(1_000),
            max_value: args.max_value.or(cfg.max_value).unwrap_or(100_000),
            seed: args.seed.or(cfg.seed).unwrap_or(0),
        };

        if eff.name_len == 0 {
            return Err(SerbenchError::Config("name_len must be > 0".into()));
        }
        if eff.max_value == 0 || eff.max_value > i64::MAX as u64 {
            return Err(SerbenchError::Config(format!(
                "max_value must be in 1..={}",
                i64::MAX
            )));
        }
        Ok(eff)
    }
}
