//! Integration tests for channel_analytics library
//!
//! These tests run the full analytics pipeline over synthetic data,
//! with no Telegram connection.

use channel_analytics::{
    accumulate, assemble, classify, compute_engagement,
    config::{ChannelEntity, DEFAULT_MESSAGE_LIMIT, DEFAULT_WINDOW_DAYS, SESSION_NAME},
    project_growth, render::render_markdown, ChannelSnapshot, ContentType, Error, MessageRecord,
    SnapshotStore, SubscriberCount, SubscriberSource, Trend, Window,
};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::tempdir;

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

fn post(id: i32, day: u32, views: u32, reactions: u32, forwards: u32) -> MessageRecord {
    MessageRecord {
        id,
        timestamp: ts(day, 12),
        has_media: false,
        media_ttl_seconds: None,
        is_round_video: false,
        text_length: 120,
        view_count: Some(views),
        reaction_count: reactions,
        forward_count: forwards,
    }
}

fn story(id: i32, day: u32, views: u32) -> MessageRecord {
    MessageRecord {
        id,
        timestamp: ts(day, 12),
        has_media: true,
        media_ttl_seconds: Some(86400),
        is_round_video: false,
        text_length: 0,
        view_count: Some(views),
        reaction_count: 0,
        forward_count: 0,
    }
}

fn circle(id: i32, day: u32, views: u32) -> MessageRecord {
    MessageRecord {
        id,
        timestamp: ts(day, 12),
        has_media: true,
        media_ttl_seconds: None,
        is_round_video: true,
        text_length: 0,
        view_count: Some(views),
        reaction_count: 2,
        forward_count: 1,
    }
}

fn week_window() -> Window {
    Window::new(ts(1, 0), ts(8, 0)).unwrap()
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn classification_is_total_and_exclusive() {
    let messages = vec![post(1, 1, 100, 5, 1), story(2, 2, 50), circle(3, 3, 30)];

    for msg in &messages {
        let matched = ContentType::ALL
            .iter()
            .filter(|&&t| classify(msg) == t)
            .count();
        assert_eq!(matched, 1);
    }

    assert_eq!(classify(&messages[0]), ContentType::Post);
    assert_eq!(classify(&messages[1]), ContentType::Story);
    assert_eq!(classify(&messages[2]), ContentType::Circle);
}

// ============================================================================
// Pipeline: accumulate -> engagement -> growth -> report -> render
// ============================================================================

#[test]
fn full_pipeline_produces_consistent_report() {
    let messages = vec![
        post(5, 7, 500, 25, 5),
        post(4, 6, 400, 10, 0),
        story(3, 5, 200),
        post(2, 3, 300, 5, 0),
        circle(1, 2, 100),
    ];

    let window = week_window();
    let totals = accumulate(&messages, &window).expect("accumulate");

    assert_eq!(totals.get(ContentType::Post).message_count, 3);
    assert_eq!(totals.get(ContentType::Post).total_views, 1200);
    assert_eq!(totals.get(ContentType::Story).message_count, 1);
    assert_eq!(totals.get(ContentType::Story).total_views, 200);
    assert_eq!(totals.get(ContentType::Circle).message_count, 1);

    let subs = SubscriberCount::new(1000, SubscriberSource::FullChannel);
    let engagement = compute_engagement(&totals, &subs);

    // (25 + 10 + 5 + 5 + 0 + 0) / (1000 * 3) * 100 = 1.5
    assert!((engagement.engagement_rate - 1.5).abs() < 1e-9);
    assert!(!engagement.clamped);

    let snapshots = vec![
        ChannelSnapshot {
            timestamp: ts(1, 0),
            subscriber_count: 900,
        },
        ChannelSnapshot {
            timestamp: ts(8, 0),
            subscriber_count: 1000,
        },
    ];
    let forecast = project_growth(&snapshots).expect("forecast");
    assert_eq!(forecast.trend, Trend::Rising);
    assert_eq!(forecast.projected_subscribers_next_period, 1100);

    let report = assemble("mychannel", totals, engagement, forecast, window);
    assert_eq!(report.channel, "mychannel");
    assert_eq!(report.totals.get(ContentType::Post).total_reactions, 40);

    let markdown = render_markdown(&report);
    assert!(markdown.contains("# Channel Report: mychannel"));
    assert!(markdown.contains("Post engagement rate: 1.50%"));
    assert!(markdown.contains("- Trend: Rising"));
    assert!(markdown.contains("Projected subscribers next period: 1100"));
}

#[test]
fn empty_window_yields_zero_report() {
    let window = week_window();
    let totals = accumulate(&[], &window).expect("accumulate");
    let engagement = compute_engagement(&totals, &SubscriberCount::unknown());

    assert_eq!(engagement.engagement_rate, 0.0);
    assert!(!engagement.clamped);

    let forecast = project_growth(&[]).expect("forecast");
    assert_eq!(forecast.trend, Trend::Flat);
    assert_eq!(forecast.projected_subscribers_next_period, 0);

    let report = assemble("empty", totals, engagement, forecast, window);
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["totals"]["posts"]["message_count"], 0);
    assert_eq!(json["totals"]["stories"]["total_views"], 0);
    assert_eq!(json["totals"]["circles"]["total_forwards"], 0);
}

#[test]
fn stale_subscriber_count_is_clamped_not_propagated() {
    let messages = vec![post(1, 2, 10_000, 900, 100)];
    let window = week_window();
    let totals = accumulate(&messages, &window).expect("accumulate");

    // One subscriber with a thousand reactions: raw rate far above 100.
    let subs = SubscriberCount::new(1, SubscriberSource::CachedEntity);
    let engagement = compute_engagement(&totals, &subs);

    assert!(engagement.clamped);
    assert_eq!(engagement.engagement_rate, 100.0);
    assert!(engagement.raw_engagement_rate > 100.0);
}

#[test]
fn messages_outside_window_are_excluded() {
    let window = Window::new(ts(3, 0), ts(5, 0)).unwrap();
    let messages = vec![
        post(4, 6, 100, 1, 0),
        post(3, 4, 200, 2, 0),
        post(2, 3, 300, 3, 0),
        post(1, 1, 400, 4, 0),
    ];

    let totals = accumulate(&messages, &window).expect("accumulate");
    assert_eq!(totals.get(ContentType::Post).message_count, 2);
    assert_eq!(totals.get(ContentType::Post).total_views, 500);
}

#[test]
fn unordered_input_is_rejected() {
    let window = week_window();
    let messages = vec![post(1, 2, 10, 0, 0), post(2, 5, 10, 0, 0), post(3, 3, 10, 0, 0)];

    let err = accumulate(&messages, &window).unwrap_err();
    assert!(matches!(err, Error::UnorderedInput(_)));
}

// ============================================================================
// Snapshots feeding growth
// ============================================================================

#[test]
fn snapshot_store_feeds_growth_projection() {
    let temp = tempdir().expect("tempdir");
    let store = SnapshotStore::new(temp.path());

    for (day, count) in [(1, 1000u64), (2, 1100), (3, 1200)] {
        store
            .append(
                "growing",
                ChannelSnapshot {
                    timestamp: ts(day, 0),
                    subscriber_count: count,
                },
            )
            .expect("append");
    }

    let snapshots = store.load("growing").expect("load");
    let forecast = project_growth(&snapshots).expect("forecast");

    assert_eq!(forecast.trend, Trend::Rising);
    assert_eq!(forecast.projected_subscribers_next_period, 1300);
}

#[test]
fn single_snapshot_projects_flat() {
    let snapshots = vec![ChannelSnapshot {
        timestamp: ts(1, 0),
        subscriber_count: 321,
    }];

    let forecast = project_growth(&snapshots).expect("forecast");
    assert_eq!(forecast.trend, Trend::Flat);
    assert_eq!(forecast.projected_subscribers_next_period, 321);
}

// ============================================================================
// Config defaults
// ============================================================================

#[test]
fn config_constants_have_expected_values() {
    assert_eq!(SESSION_NAME, "channel_session");
    assert_eq!(DEFAULT_WINDOW_DAYS, 7);
    assert_eq!(DEFAULT_MESSAGE_LIMIT, 500);
}

#[test]
fn channel_entity_username_strips_at() {
    let entity = ChannelEntity::username("@durov");
    assert!(matches!(entity, ChannelEntity::Username(ref s) if s == "durov"));

    let entity = ChannelEntity::id(12345);
    assert!(matches!(entity, ChannelEntity::Id(12345)));
}
