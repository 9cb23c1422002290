//! Sequential batch runner.
//!
//! Feeds messages through a `Recommender` one at a time, sleeping a fixed
//! delay after each message before starting the next.

use std::time::Duration;

use pw_pipeline::{RecommendResult, Recommender};
use pw_protocol::{BatchRecord, Message, Product};
use tokio::time;

/// Runs a message set through a recommender.
pub struct BatchRunner<'a> {
    recommender: &'a dyn Recommender,
    delay: Duration,
    progress_every: usize,
}

impl<'a> BatchRunner<'a> {
    pub fn new(recommender: &'a dyn Recommender, delay: Duration, progress_every: usize) -> Self {
        Self {
            recommender,
            delay,
            progress_every,
        }
    }

    pub async fn run(&self, messages: &[Message], catalog: &[Product]) -> RecommendResult<Vec<BatchRecord>> {
        self.run_with_progress(messages, catalog, |_, _| {}).await
    }

    /// Process every message in order, calling `on_progress(done, total)`
    /// after each `progress_every` messages.
    ///
    /// The first oracle failure aborts the batch.
    pub async fn run_with_progress<F>(
        &self,
        messages: &[Message],
        catalog: &[Product],
        mut on_progress: F,
    ) -> RecommendResult<Vec<BatchRecord>>
    where
        F: FnMut(usize, usize),
    {
        let total = messages.len();
        let mut records = Vec::with_capacity(total);

        tracing::info!(total, delay_ms = self.delay.as_millis() as u64, "batch started");

        for (i, message) in messages.iter().enumerate() {
            // No wait before the first message.
            if i > 0 && !self.delay.is_zero() {
                time::sleep(self.delay).await;
            }

            let result = match self.recommender.recommend(&message.text, catalog).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(message_id = %message.id, error = %e, "batch aborted");
                    return Err(e);
                }
            };

            tracing::debug!(
                message_id = %message.id,
                stage = ?result.stage(),
                picks = result.recommendations.len(),
                "message processed"
            );
            records.push(BatchRecord::from_result(message.id.clone(), &result));

            let done = i + 1;
            if self.progress_every > 0 && done % self.progress_every == 0 {
                tracing::info!(done, total, "batch progress");
                on_progress(done, total);
            }
        }

        tracing::info!(
            total,
            recommended = records.iter().filter(|r| r.has_recommendation()).count(),
            "batch finished"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pw_oracle::OracleError;
    use pw_pipeline::PipelineError;
    use pw_protocol::{PipelineResult, Recommendation};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Recommends the first catalog product for messages containing "buy".
    /// Fails on "boom".
    #[derive(Default)]
    struct EchoRecommender {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Recommender for EchoRecommender {
        async fn recommend(&self, message: &str, catalog: &[Product]) -> RecommendResult<PipelineResult> {
            self.seen.lock().unwrap().push(message.to_string());
            if message.contains("boom") {
                return Err(PipelineError::Oracle(OracleError::Other("boom".into())));
            }
            if !message.contains("buy") {
                return Ok(PipelineResult::no_intent(String::new()));
            }
            Ok(intent_result(&catalog[0].id))
        }
    }

    fn intent_result(product_id: &str) -> PipelineResult {
        PipelineResult {
            should_recommend: true,
            categories: vec!["Audio".into()],
            num_candidates: Some(1),
            recommendations: vec![Recommendation::new(product_id, 0.8)],
            reasoning: "match".into(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![Product {
            id: "P1".into(),
            name: "Buds".into(),
            category: "Audio".into(),
            price: 40.0,
            stock_quantity: 2,
            avg_rating: 4.1,
            description: String::new(),
        }]
    }

    fn messages(texts: &[&str]) -> Vec<Message> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Message::new(format!("M{}", i + 1), *t))
            .collect()
    }

    #[tokio::test]
    async fn records_follow_message_order() {
        let recommender = EchoRecommender::default();
        let runner = BatchRunner::new(&recommender, Duration::ZERO, 10);

        let records = runner
            .run(&messages(&["buy buds", "hello", "buy more"]), &catalog())
            .await
            .unwrap();

        let ids: Vec<_> = records.iter().map(|r| r.message_id.as_str()).collect();
        assert_eq!(ids, vec!["M1", "M2", "M3"]);
        assert_eq!(records[0].recommended_product_id.as_deref(), Some("P1"));
        assert!(!records[1].should_recommend);
        assert!(records[1].recommended_product_id.is_none());
        assert_eq!(
            *recommender.seen.lock().unwrap(),
            vec!["buy buds", "hello", "buy more"]
        );
    }

    #[tokio::test]
    async fn progress_reported_every_n() {
        let recommender = EchoRecommender::default();
        let runner = BatchRunner::new(&recommender, Duration::ZERO, 2);

        let mut reports = Vec::new();
        runner
            .run_with_progress(&messages(&["a", "b", "c", "d", "e"]), &catalog(), |done, total| {
                reports.push((done, total))
            })
            .await
            .unwrap();

        assert_eq!(reports, vec![(2, 5), (4, 5)]);
    }

    #[tokio::test]
    async fn oracle_failure_aborts_batch() {
        let recommender = EchoRecommender::default();
        let runner = BatchRunner::new(&recommender, Duration::ZERO, 0);

        let result = runner
            .run(&messages(&["buy", "boom", "buy again"]), &catalog())
            .await;

        assert!(result.is_err());
        assert_eq!(recommender.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delay_spaces_messages() {
        let recommender = EchoRecommender::default();
        let runner = BatchRunner::new(&recommender, Duration::from_millis(20), 0);

        let started = Instant::now();
        runner
            .run(&messages(&["a", "b", "c"]), &catalog())
            .await
            .unwrap();

        // Two waits between three messages; none before the first.
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    /// Takes `work` per message and records when each call started and ended.
    struct SlowRecommender {
        work: Duration,
        spans: Mutex<Vec<(Instant, Instant)>>,
    }

    #[async_trait]
    impl Recommender for SlowRecommender {
        async fn recommend(&self, _message: &str, _catalog: &[Product]) -> RecommendResult<PipelineResult> {
            let start = Instant::now();
            time::sleep(self.work).await;
            self.spans.lock().unwrap().push((start, Instant::now()));
            Ok(PipelineResult::no_intent(String::new()))
        }
    }

    #[tokio::test]
    async fn delay_follows_slow_messages() {
        let recommender = SlowRecommender {
            work: Duration::from_millis(30),
            spans: Mutex::new(Vec::new()),
        };
        let delay = Duration::from_millis(20);
        BatchRunner::new(&recommender, delay, 0)
            .run(&messages(&["a", "b", "c"]), &catalog())
            .await
            .unwrap();

        let spans = recommender.spans.lock().unwrap();
        assert_eq!(spans.len(), 3);
        for pair in spans.windows(2) {
            let (_, prev_end) = pair[0];
            let (next_start, _) = pair[1];
            assert!(next_start.duration_since(prev_end) >= delay);
        }
    }

    #[tokio::test]
    async fn empty_batch() {
        let recommender = EchoRecommender::default();
        let records = BatchRunner::new(&recommender, Duration::from_secs(60), 10)
            .run(&[], &catalog())
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
