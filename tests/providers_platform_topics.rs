use campaign_signal_analyzer::feeds::providers::platform_topics::PlatformTopicsProvider;
use campaign_signal_analyzer::feeds::types::{FeedProvider, Sentiment};
use std::fs;

#[tokio::test]
async fn topic_fixture_parses_with_both_sentiment_spellings() {
    let json = fs::read_to_string("tests/fixtures/platform_topics.json")
        .expect("missing tests/fixtures/platform_topics.json");

    let provider = PlatformTopicsProvider::from_fixture_str(&json);

    let topics = provider.fetch_latest().await.expect("topic parse ok");
    assert_eq!(topics.len(), 3);

    let hybrids = topics.iter().find(|t| t.topic == "Hybrid SUVs").unwrap();
    assert_eq!(hybrids.sentiment, Some(Sentiment::VeryPositive));
    assert_eq!(hybrids.mentions, Some(15_400));

    // "very positive" with a space is the original data's spelling.
    let trips = topics
        .iter()
        .find(|t| t.topic == "Family road trips")
        .unwrap();
    assert_eq!(trips.sentiment, Some(Sentiment::VeryPositive));
    assert_eq!(trips.mentions, None);
}
