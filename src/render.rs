//! Markdown rendering of report summaries

use crate::analytics::classify::ContentType;
use crate::analytics::growth::Trend;
use crate::analytics::report::ReportSummary;

/// Render a report summary to Markdown.
pub fn render_markdown(report: &ReportSummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# Channel Report: {}", report.channel));
    lines.push(String::new());
    lines.push(format!(
        "- Period: {} to {} UTC",
        report.period.start.format("%Y-%m-%d %H:%M:%S"),
        report.period.end.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!(
        "- Generated: {} UTC",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!(
        "- Subscribers: {} (source: {})",
        report.engagement.subscriber_count,
        report.engagement.subscriber_source.label()
    ));
    lines.push(String::new());

    lines.push("## Content".to_string());
    lines.push(String::new());
    lines.push("| Type | Messages | Views | Reactions | Forwards |".to_string());
    lines.push("|------|----------|-------|-----------|----------|".to_string());
    for content_type in ContentType::ALL {
        let totals = report.totals.get(content_type);
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            content_type.label(),
            totals.message_count,
            totals.total_views,
            totals.total_reactions,
            totals.total_forwards
        ));
    }
    lines.push(String::new());

    lines.push("## Engagement".to_string());
    lines.push(String::new());
    lines.push(format!(
        "- Post engagement rate: {:.2}%",
        report.engagement.engagement_rate
    ));
    if report.engagement.clamped {
        lines.push(format!(
            "  - Raw value {:.2}% exceeded bounds and was clamped",
            report.engagement.raw_engagement_rate
        ));
    }
    lines.push(format!(
        "- Story engagement rate: {:.2}%",
        report.engagement.story_engagement_rate
    ));
    lines.push(format!(
        "- Circle engagement rate: {:.2}%",
        report.engagement.circle_engagement_rate
    ));
    lines.push(String::new());

    lines.push("## Growth".to_string());
    lines.push(String::new());
    lines.push(format!("- Trend: {}", trend_label(report.forecast.trend)));
    lines.push(format!(
        "- Average change per period: {:.1}",
        report.forecast.average_delta
    ));
    lines.push(format!(
        "- Projected subscribers next period: {}",
        report.forecast.projected_subscribers_next_period
    ));
    lines.push(String::new());

    lines.join("\n")
}

fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => "Rising",
        Trend::Falling => "Falling",
        Trend::Flat => "Flat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::accumulate::{accumulate, TotalsByType, Window};
    use crate::analytics::engagement::{compute_engagement, SubscriberCount, SubscriberSource};
    use crate::analytics::growth::{GrowthForecast, Trend};
    use crate::analytics::report::assemble;
    use chrono::{TimeZone, Utc};

    fn sample_report(totals: TotalsByType, clamped_subs: u64) -> ReportSummary {
        let window = Window::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let subs = SubscriberCount::new(clamped_subs, SubscriberSource::FullChannel);
        let engagement = compute_engagement(&totals, &subs);
        let forecast = GrowthForecast {
            trend: Trend::Rising,
            projected_subscribers_next_period: 1200,
            average_delta: 100.0,
        };
        assemble("testchannel", totals, engagement, forecast, window)
    }

    #[test]
    fn renders_header_and_sections() {
        let window = Window::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let totals = accumulate(&[], &window).unwrap();
        let report = sample_report(totals, 1000);

        let markdown = render_markdown(&report);
        assert!(markdown.contains("# Channel Report: testchannel"));
        assert!(markdown.contains("## Content"));
        assert!(markdown.contains("## Engagement"));
        assert!(markdown.contains("## Growth"));
        assert!(markdown.contains("- Trend: Rising"));
    }

    #[test]
    fn empty_buckets_render_explicit_zeros() {
        let window = Window::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let totals = accumulate(&[], &window).unwrap();
        let report = sample_report(totals, 1000);

        let markdown = render_markdown(&report);
        assert!(markdown.contains("| posts | 0 | 0 | 0 | 0 |"));
        assert!(markdown.contains("| stories | 0 | 0 | 0 | 0 |"));
        assert!(markdown.contains("| circles | 0 | 0 | 0 | 0 |"));
    }

    #[test]
    fn clamp_note_only_when_clamped() {
        let window = Window::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let totals = accumulate(&[], &window).unwrap();
        let report = sample_report(totals, 1000);

        let markdown = render_markdown(&report);
        assert!(!markdown.contains("was clamped"));
    }
}
