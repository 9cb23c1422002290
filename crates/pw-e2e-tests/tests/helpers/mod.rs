//! Shared test harness for E2E integration tests.
//!
//! Seeds a scratch data directory with a small catalog and message set and
//! wires a real `Pipeline` to a scripted oracle.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pw_cli::data::DataDir;
use pw_oracle::ScriptedOracle;
use pw_pipeline::{Pipeline, PipelineConfig};
use pw_protocol::{Message, Product};
use serde_json::json;
use tempfile::TempDir;

const MESSAGES_CSV: &str = "\
message_id,user_id,message,converted_to_purchase
M001,U01,Looking for wireless earbuds for the gym,P001
M002,U02,Love the weather today,
M003,U03,Need a thick yoga mat for my knees,P004
M004,U04,My order arrived damaged,
M005,U05,Any good trail running shoes?,P006
";

const PRODUCTS_CSV: &str = "\
product_id,name,category,price,stock_quantity,avg_rating,description
P001,Pulse Buds,Audio,79.99,12,4.6,Sweat-proof wireless earbuds
P002,Bass Cans,Audio,129.00,0,4.8,Over-ear with deep bass
P003,Budget Buds,Audio,19.99,40,3.2,Basic wired earbuds
P004,Cushion Mat,Yoga,45.00,7,4.7,12mm foam mat
P005,Travel Mat,Yoga,30.00,3,3.5,Foldable 2mm mat
P006,Ridge Runner,Running Shoes,110.00,5,4.4,Aggressive trail lugs
";

/// Scratch data directory plus a scripted oracle.
pub struct TestHarness {
    dir: TempDir,
    /// Oracle shared by both pipeline stages.
    pub oracle: Arc<ScriptedOracle>,
}

impl TestHarness {
    /// Harness with the sample catalog (6 products) and messages (5).
    pub fn with_sample_data() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("messages.csv"), MESSAGES_CSV).expect("write messages");
        fs::write(dir.path().join("products.csv"), PRODUCTS_CSV).expect("write products");
        Self {
            dir,
            oracle: Arc::new(ScriptedOracle::new()),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data(&self) -> DataDir {
        DataDir::new(self.dir.path())
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn catalog(&self) -> Vec<Product> {
        self.data().products().expect("load products")
    }

    pub fn messages(&self) -> Vec<Message> {
        self.data().messages().expect("load messages")
    }

    /// Pipeline with default thresholds over the scripted oracle.
    pub fn pipeline(&self) -> Pipeline {
        self.pipeline_with(PipelineConfig::default())
    }

    pub fn pipeline_with(&self, config: PipelineConfig) -> Pipeline {
        Pipeline::with_oracle(self.oracle.clone(), config)
    }
}

/// Classifier reply with purchase intent.
pub fn intent(categories: &[&str]) -> String {
    json!({
        "should_recommend": true,
        "categories": categories,
        "reasoning": "customer wants to buy",
    })
    .to_string()
}

/// Classifier reply without purchase intent.
pub fn no_intent(reasoning: &str) -> String {
    json!({
        "should_recommend": false,
        "categories": [],
        "reasoning": reasoning,
    })
    .to_string()
}

/// Selector reply ranking `picks` in order.
pub fn picks(picks: &[(&str, f64)]) -> String {
    let recommendations: Vec<_> = picks
        .iter()
        .map(|(id, confidence)| json!({"product_id": id, "confidence": confidence}))
        .collect();
    json!({
        "recommendations": recommendations,
        "reasoning": "best matches first",
    })
    .to_string()
}

/// Wrap a reply in a markdown code fence, as chat models often do.
pub fn fenced(reply: &str) -> String {
    format!("```json\n{reply}\n```")
}
