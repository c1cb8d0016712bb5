use anyhow::Result;
use clap::{Parser, Subcommand};

use kubevulndb_collector::{
    Collector, CollectorConfig, CollectorError, HttpAdvisorySource, VulnDb, validate_db,
};

/// kubevulndb CLI — 취약점 데이터베이스 수집 명령줄 도구
#[derive(Parser)]
#[command(name = "kubevulndb", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = "kubevulndb.toml")]
    config: String,

    /// 로그 레벨
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 피드를 수집하여 데이터베이스 JSON 파일 생성
    Collect {
        /// 출력 파일 경로
        #[arg(short, long, default_value = "k8s-vulndb.json")]
        output: String,
    },
    /// 기존 데이터베이스 파일 재검증
    Validate {
        /// 데이터베이스 파일 경로
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_level.as_str())
        .json()
        .init();

    tracing::info!(config = %cli.config, "kubevulndb-cli starting");

    let config = load_config(&cli.config).await?;

    match cli.command {
        Commands::Collect { output } => {
            let source = HttpAdvisorySource::new(&config)?;
            let collector = Collector::new(config, source);

            let db = collector.collect().await?;
            let json = db.to_json()?;
            tokio::fs::write(&output, json).await?;

            tracing::info!(
                output = %output,
                advisories = db.advisory_count(),
                "database written"
            );
            println!("✓ {} advisories written to {}", db.advisory_count(), output);
        }
        Commands::Validate { file } => {
            let content = tokio::fs::read_to_string(&file).await?;
            let db = VulnDb::from_json(&content)?;

            match validate_db(&db) {
                Ok(()) => {
                    println!("✓ {} advisories, no violations", db.advisory_count());
                }
                Err(report) => {
                    eprintln!("{report}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// 설정 파일을 로드합니다. 파일이 없으면 기본값에 환경변수만 적용합니다.
async fn load_config(path: &str) -> Result<CollectorConfig> {
    match CollectorConfig::load(path).await {
        Ok(config) => Ok(config),
        Err(CollectorError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::warn!(path = %path, "config file not found, using defaults");
            let mut config = CollectorConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}
