use std::sync::Arc;
use std::time::Duration;

use tally_core::config::{LearningConfig, MonitorConfig, ResolverConfig};
use tally_core::models::{ExpenseType, FeedbackRecord, SuggestionSource};
use tally_core::traits::IMerchantResearch;
use tally_knowledge::KnowledgeBase;
use tally_learning::LearningEngine;
use tally_observability::PerformanceMonitor;
use tally_resolver::TagSuggestionResolver;
use tally_storage::InMemoryFeedbackStore;
use test_fixtures::{known_merchant_labels, tx, FailingResearch, SlowResearch, StaticResearch};

struct Harness {
    learning: Arc<LearningEngine>,
    monitor: Arc<PerformanceMonitor>,
    resolver: TagSuggestionResolver,
}

fn harness_with(research: Option<Arc<dyn IMerchantResearch>>, config: ResolverConfig) -> Harness {
    let knowledge = Arc::new(KnowledgeBase::builtin().unwrap());
    let learning = Arc::new(LearningEngine::new(
        Arc::new(InMemoryFeedbackStore::new()),
        LearningConfig::default(),
    ));
    let monitor = Arc::new(PerformanceMonitor::new(MonitorConfig::default()));
    let resolver = TagSuggestionResolver::new(
        knowledge,
        Arc::clone(&learning),
        research,
        Arc::clone(&monitor),
        config,
    );
    Harness {
        learning,
        monitor,
        resolver,
    }
}

fn harness() -> Harness {
    harness_with(None, ResolverConfig::default())
}

#[tokio::test]
async fn known_merchant_resolves_from_table() {
    let h = harness();
    let s = h.resolver.resolve(&tx("t1", "NETFLIX SARL 12.99 EUR", 12.99), false).await;
    assert_eq!(s.suggested_tag, "streaming");
    assert_eq!(s.source, SuggestionSource::KnownPattern);
    assert!(s.confidence.value() >= 0.95);
    assert!(!s.fallback_used);
    assert!(s.alternative_tags.len() <= 3);
    assert!(!s.alternative_tags.contains(&s.suggested_tag));
    assert_eq!(s.expense_type, Some(ExpenseType::Fixed));
}

#[tokio::test]
async fn merchant_inside_a_longer_token_keeps_table_confidence() {
    let h = harness();
    let s = h.resolver.resolve(&tx("t1", "NETFLIXCOM", 12.99), false).await;
    assert_eq!(s.suggested_tag, "streaming");
    assert_eq!(s.source, SuggestionSource::KnownPattern);
    assert!(s.confidence.value() >= 0.95);
}

#[tokio::test]
async fn golden_known_merchants_get_their_tags() {
    let h = harness();
    for (i, golden) in known_merchant_labels().iter().enumerate() {
        let s = h
            .resolver
            .resolve(&tx(&format!("g{i}"), &golden.label, golden.amount), false)
            .await;
        assert_eq!(Some(&s.suggested_tag), golden.tag.as_ref(), "label {}", golden.label);
        assert_eq!(s.source, SuggestionSource::KnownPattern);
    }
}

#[tokio::test]
async fn unknown_merchant_gets_generic_fallback() {
    let h = harness();
    let s = h.resolver.resolve(&tx("t1", "XYZCORP 47.00", 47.0), false).await;
    assert_eq!(s.suggested_tag, "divers");
    assert!(s.fallback_used);
    assert_eq!(s.source, SuggestionSource::Fallback);
    assert!(s.confidence.value() < 0.5);
}

#[tokio::test]
async fn large_amount_uses_amount_band() {
    let h = harness();
    let s = h.resolver.resolve(&tx("t1", "XYZCORP", 1_250.0), false).await;
    assert_eq!(s.suggested_tag, "large-purchase");
    assert!(s.fallback_used);
}

#[tokio::test]
async fn context_keyword_beats_generic_fallback() {
    let h = harness();
    let s = h.resolver.resolve(&tx("t1", "CB CHEZ PAUL RESTAURANT", 32.0), false).await;
    assert_eq!(s.suggested_tag, "restaurant");
    assert!(s.fallback_used);
    assert!((s.confidence.value() - 0.4).abs() < 1e-9);
}

#[tokio::test]
async fn learned_pattern_takes_over_after_two_corrections() {
    let h = harness();
    for id in ["t1", "t2"] {
        h.learning
            .record_feedback(
                FeedbackRecord::correction(id, "CB CHEZ PAUL RESTAURANT")
                    .tag(Some("restaurant"), Some("bistro")),
            )
            .unwrap();
    }
    let s = h.resolver.resolve(&tx("t3", "CB CHEZ PAUL RESTAURANT", 30.0), false).await;
    assert_eq!(s.suggested_tag, "bistro");
    assert_eq!(s.source, SuggestionSource::LearnedPattern);
    assert!(s.confidence.value() >= 0.7);
    assert!(!s.fallback_used);
}

#[tokio::test]
async fn known_pattern_defers_to_disagreeing_learned_pattern() {
    let h = harness();
    for id in ["t1", "t2"] {
        h.learning
            .record_feedback(FeedbackRecord::correction(id, "NETFLIX").tag(Some("streaming"), Some("family")))
            .unwrap();
    }
    let s = h.resolver.resolve(&tx("t3", "NETFLIX", 12.99), false).await;
    assert_eq!(s.suggested_tag, "family");
    assert_eq!(s.source, SuggestionSource::LearnedPattern);
}

#[tokio::test]
async fn research_only_runs_when_requested() {
    let research = Arc::new(StaticResearch::new().with("xyzcorp", "software", 0.99));
    let h = harness_with(Some(research.clone()), ResolverConfig::default());

    let fast = h.resolver.resolve(&tx("t1", "XYZCORP 47.00", 47.0), false).await;
    assert_eq!(fast.suggested_tag, "divers");
    assert_eq!(research.calls(), 0);

    let researched = h.resolver.resolve(&tx("t2", "XYZCORP 47.00", 47.0), true).await;
    assert_eq!(researched.suggested_tag, "software");
    assert_eq!(researched.source, SuggestionSource::Research);
    assert!((researched.confidence.value() - 0.85).abs() < 1e-9, "capped");
    assert_eq!(researched.alternative_tags, vec!["divers"]);
    assert_eq!(research.calls(), 1);
}

#[tokio::test]
async fn known_merchants_never_reach_research() {
    let research = Arc::new(StaticResearch::new());
    let h = harness_with(Some(research.clone()), ResolverConfig::default());
    let s = h.resolver.resolve(&tx("t1", "CB LIDL 45.60", 45.6), true).await;
    assert_eq!(s.suggested_tag, "groceries");
    assert_eq!(research.calls(), 0);
}

#[tokio::test]
async fn failing_research_degrades_to_fallback() {
    let research = Arc::new(FailingResearch::new());
    let h = harness_with(Some(research.clone()), ResolverConfig::default());
    let s = h.resolver.resolve(&tx("t1", "XYZCORP", 47.0), true).await;
    assert_eq!(s.suggested_tag, "divers");
    assert!(s.fallback_used);
    assert_eq!(research.calls(), 1);
    assert_eq!(h.monitor.degradations().total_recorded(), 1);
    assert_eq!(h.monitor.snapshot().active_degradations, 1);
    assert!(s.explanation.ends_with("; merchant research failed"));

    let plain = h.resolver.resolve(&tx("t2", "XYZCORP", 47.0), false).await;
    assert_ne!(s.explanation, plain.explanation);
}

#[tokio::test]
async fn slow_research_times_out() {
    let research = Arc::new(SlowResearch::new(Duration::from_millis(500), "software"));
    let config = ResolverConfig {
        research_timeout_ms: 20,
        ..ResolverConfig::default()
    };
    let h = harness_with(Some(research), config);
    let s = h.resolver.resolve(&tx("t1", "XYZCORP", 47.0), true).await;
    assert_eq!(s.suggested_tag, "divers");
    assert!(s.processing_time < Duration::from_millis(500));
    let degradations = h.monitor.degradations();
    assert_eq!(degradations.total_recorded(), 1);
    assert!(degradations.events()[0].event.failure.contains("timed out"));
    assert_eq!(
        s.explanation,
        "unknown merchant, generic category; merchant research timed out"
    );
}

#[tokio::test]
async fn repeated_corrections_lower_future_confidence() {
    let h = harness();
    for i in 0..3 {
        h.learning
            .record_feedback(
                FeedbackRecord::correction(format!("c{i}"), format!("unknown shop {i}"))
                    .tag(Some("divers"), Some("groceries")),
            )
            .unwrap();
    }
    let s = h.resolver.resolve(&tx("t1", "XYZCORP", 47.0), false).await;
    assert_eq!(s.suggested_tag, "divers");
    assert!((s.confidence.value() - 0.05).abs() < 1e-9);
    assert!(s.explanation.contains("corrected 3 times"));
}

#[test]
fn stage_order_without_research() {
    let h = harness();
    assert_eq!(
        h.resolver.stage_names(),
        vec!["known_pattern", "learned_pattern", "heuristic"]
    );
    assert!(!h.resolver.has_research());
}
