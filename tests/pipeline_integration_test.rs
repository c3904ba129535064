//! 问答管线集成测试

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kampus::directory::StaffDirectory;
    use kampus::llm::MockLlmClient;
    use kampus::matcher::FuzzyMatcher;
    use kampus::reply::{RemoteFallback, ResponseTemplater, APOLOGY_TEXT, DEFAULT_TEMPLATES};
    use kampus::stats::{today, QueryCounter, SqliteQueryCounter};
    use kampus::ResolutionPipeline;

    const DATASET: &str = r#"{
        "data_dosen": [
            {"nama_dosen": "Budi Santoso", "nip": "198001012005011001"},
            {"nama_dosen": "Siti Aminah", "nip": "197505152000122002"},
            {"nama_dosen": "Agus Wibowo", "nip": "198203032010121003"}
        ]
    }"#;

    struct Harness {
        pipeline: Arc<ResolutionPipeline>,
        llm: Arc<MockLlmClient>,
        counter: Arc<SqliteQueryCounter>,
    }

    fn harness(llm: MockLlmClient) -> Harness {
        let llm = Arc::new(llm);
        let counter = Arc::new(SqliteQueryCounter::open_in_memory().unwrap());
        let pipeline = ResolutionPipeline::new(
            Arc::new(StaffDirectory::from_json_str(DATASET).unwrap()),
            FuzzyMatcher::default(),
            ResponseTemplater::new(),
            RemoteFallback::new(llm.clone()),
            counter.clone(),
        );
        Harness {
            pipeline: Arc::new(pipeline),
            llm,
            counter,
        }
    }

    fn is_templated(reply: &str, name: &str, nip: &str) -> bool {
        DEFAULT_TEMPLATES
            .iter()
            .any(|t| t.replace("{dosen}", name).replace("{nip}", nip) == reply)
    }

    #[tokio::test]
    async fn test_identifier_query_answers_locally() {
        let h = harness(MockLlmClient::replying("remote"));
        let reply = h.pipeline.ask("NIP 198001012005011001 siapa?").await.reply;
        assert!(is_templated(&reply, "Budi Santoso", "198001012005011001"), "{}", reply);
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_typo_name_answers_locally() {
        let h = harness(MockLlmClient::replying("remote"));
        let reply = h.pipeline.ask("budi santosoo").await.reply;
        assert!(is_templated(&reply, "Budi Santoso", "198001012005011001"), "{}", reply);
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_general_question_goes_remote_once() {
        let h = harness(MockLlmClient::replying("  Cek kalender akademik bro  "));
        let reply = h.pipeline.ask("jadwal ujian semester depan").await.reply;
        assert_eq!(reply, "Cek kalender akademik bro");
        assert_eq!(h.llm.calls(), 1);
        assert_eq!(h.llm.last_request().unwrap().user, "jadwal ujian semester depan");
    }

    #[tokio::test]
    async fn test_remote_failure_still_answers() {
        let h = harness(MockLlmClient::failing("network down"));
        let reply = h.pipeline.ask("apa itu sks").await.reply;
        assert_eq!(reply, APOLOGY_TEXT);
        assert!(!reply.is_empty());
    }

    #[tokio::test]
    async fn test_every_query_counted_once() {
        let h = harness(MockLlmClient::failing("network down"));
        h.pipeline.ask("NIP 197505152000122002").await;
        h.pipeline.ask("siti aminah").await;
        h.pipeline.ask("jadwal ujian").await;
        assert_eq!(h.counter.count_for(today()), 3);
        assert_eq!(h.pipeline.today_count().await, 3);
    }

    #[tokio::test]
    async fn test_concurrent_queries_no_lost_counts() {
        let h = harness(MockLlmClient::replying("ok"));
        let mut handles = Vec::new();
        for i in 0..50 {
            let pipeline = h.pipeline.clone();
            handles.push(tokio::spawn(async move {
                let q = if i % 2 == 0 { "agus wibowo" } else { "beasiswa kapan dibuka" };
                pipeline.ask(q).await
            }));
        }
        for handle in handles {
            assert!(!handle.await.unwrap().reply.is_empty());
        }
        assert_eq!(h.pipeline.today_count().await, 50);
        assert_eq!(h.llm.calls(), 25);
    }
}
