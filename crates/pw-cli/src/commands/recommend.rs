//! `pickwise recommend`: one message or the whole message file.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use pw_oracle::build_oracle;
use pw_pipeline::{Pipeline, Recommender};

use crate::batch::BatchRunner;
use crate::config::AppConfig;
use crate::data::{self, DataDir};
use crate::output;

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(short, long, default_value = "data", help = "Directory holding messages.csv and products.csv")]
    pub data_dir: PathBuf,
    #[arg(short, long, default_value = "recommendations.csv", help = "Batch output CSV path")]
    pub output: PathBuf,
    #[arg(long, help = "Recommend for this text only and print the result")]
    pub message: Option<String>,
    #[arg(long, help = "Override the configured pause between messages")]
    pub delay_secs: Option<u64>,
}

pub async fn run(args: &RecommendArgs, config: &AppConfig) -> anyhow::Result<()> {
    let oracle = build_oracle(&config.oracle).context("building oracle client")?;
    let pipeline = Pipeline::with_oracle(oracle, config.pipeline.clone());
    execute(&pipeline, args, config, &mut std::io::stdout()).await
}

/// Run the command against any recommender, writing user-facing text to `out`.
pub async fn execute<W: Write>(
    recommender: &dyn Recommender,
    args: &RecommendArgs,
    config: &AppConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "Loading data...")?;
    let data = DataDir::new(&args.data_dir);
    let catalog = data.products()?;

    if let Some(message) = &args.message {
        writeln!(out, "Finding personalized recommendations...")?;
        let result = recommender.recommend(message, &catalog).await?;
        write!(out, "{}", output::format_single(message, &result, &catalog))?;
        return Ok(());
    }

    let messages = data.messages()?;
    writeln!(out, "Processing {} messages...", messages.len())?;

    let delay = args
        .delay_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.batch.delay());
    let runner = BatchRunner::new(recommender, delay, config.batch.progress_every);
    let records = runner
        .run_with_progress(&messages, &catalog, |done, total| {
            if let Err(e) = writeln!(out, "  Processed {done}/{total}") {
                tracing::warn!(error = %e, done, total, "failed to write progress");
            }
        })
        .await?;

    data::write_batch(&args.output, &records)?;
    writeln!(out, "\nSaved recommendations to {}", args.output.display())?;
    write!(out, "{}", output::format_summary(&records))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_oracle::ScriptedOracle;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    const INTENT: &str = r#"{"should_recommend": true, "categories": ["Audio"], "reasoning": "wants buds"}"#;
    const NO_INTENT: &str = r#"{"should_recommend": false, "categories": [], "reasoning": "chit-chat"}"#;
    const PICK: &str = r#"{"recommendations": [{"product_id": "P1", "confidence": 0.9}], "reasoning": "best buds"}"#;

    fn seed(dir: &Path) {
        fs::write(
            dir.join("messages.csv"),
            "message_id,message,converted_to_purchase\nM1,need earbuds,P1\nM2,nice day,\n",
        )
        .unwrap();
        fs::write(
            dir.join("products.csv"),
            "product_id,name,category,price,stock_quantity,avg_rating,description\n\
             P1,Quiet Buds,Audio,59.5,4,4.3,Noise cancelling\n",
        )
        .unwrap();
    }

    fn args(dir: &Path, message: Option<&str>) -> RecommendArgs {
        RecommendArgs {
            data_dir: dir.to_path_buf(),
            output: dir.join("out.csv"),
            message: message.map(String::from),
            delay_secs: Some(0),
        }
    }

    #[tokio::test]
    async fn single_message_prints_table() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let oracle = Arc::new(ScriptedOracle::with_replies([INTENT, PICK]));
        let pipeline = Pipeline::with_oracle(oracle.clone(), Default::default());

        let mut out = Vec::new();
        execute(&pipeline, &args(dir.path(), Some("need earbuds")), &AppConfig::default(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CATEGORIES: Audio"));
        assert!(text.contains("Quiet Buds"));
        assert!(text.contains("REASONING: best buds"));
        assert_eq!(oracle.calls(), 2);
        assert!(!dir.path().join("out.csv").exists());
    }

    #[tokio::test]
    async fn batch_writes_csv_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let oracle = Arc::new(ScriptedOracle::with_replies([INTENT, PICK, NO_INTENT]));
        let pipeline = Pipeline::with_oracle(oracle.clone(), Default::default());

        let mut out = Vec::new();
        execute(&pipeline, &args(dir.path(), None), &AppConfig::default(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Processing 2 messages..."));
        assert!(text.contains("Purchase intent detected: 1/2"));
        assert!(text.contains("Recommendations made: 1/2"));
        assert_eq!(oracle.calls(), 3);

        let rows = data::read_recommendations(&dir.path().join("out.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id(), Some("P1"));
        assert_eq!(rows[1].product_id(), None);
    }

    /// Accepts everything except progress lines.
    #[derive(Default)]
    struct ProgressRejectingWriter {
        written: Vec<u8>,
    }

    impl Write for ProgressRejectingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if String::from_utf8_lossy(buf).contains("Processed") {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn progress_write_failure_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let oracle = Arc::new(ScriptedOracle::with_replies([INTENT, PICK, NO_INTENT]));
        let pipeline = Pipeline::with_oracle(oracle.clone(), Default::default());
        let mut config = AppConfig::default();
        config.batch.progress_every = 1;

        let mut out = ProgressRejectingWriter::default();
        execute(&pipeline, &args(dir.path(), None), &config, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out.written).unwrap();
        assert!(!text.contains("Processed"));
        assert!(text.contains("Recommendations made: 1/2"));
        assert_eq!(oracle.calls(), 3);
        assert!(dir.path().join("out.csv").exists());
    }

    #[tokio::test]
    async fn missing_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = Arc::new(ScriptedOracle::new());
        let pipeline = Pipeline::with_oracle(oracle.clone(), Default::default());

        let mut out = Vec::new();
        let err = execute(&pipeline, &args(dir.path(), None), &AppConfig::default(), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("products.csv"));
        assert_eq!(oracle.calls(), 0);
    }
}
