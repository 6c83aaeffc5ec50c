use std::fmt::Write as _;

use jiff::Span;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::assessment::{AssessmentRecord, RiskLevel};
use super::booking::{Booking, BookingStatus};
use super::chat::ChatInteraction;
use super::resource::Resource;

/// Trend window selectable on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeRange {
    pub fn days(self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskDistribution {
    pub low: u32,
    pub moderate: u32,
    pub high: u32,
}

impl RiskDistribution {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Moderate => self.moderate += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn count(&self, level: RiskLevel) -> u32 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Moderate => self.moderate,
            RiskLevel::High => self.high,
        }
    }

    pub fn total(&self) -> u32 {
        self.low + self.moderate + self.high
    }

    /// Share of assessments at `level`, rounded to a whole percent.
    pub fn percentage(&self, level: RiskLevel) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((f64::from(self.count(level)) / f64::from(total)) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendPoint {
    pub date: Date,
    pub assessments: u32,
    pub bookings: u32,
    pub chats: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyticsSummary {
    pub range: TimeRange,
    pub total_assessments: u32,
    pub risk_distribution: RiskDistribution,
    pub total_bookings: u32,
    pub chat_interactions: u32,
    pub crisis_detections: u32,
    pub average_session_minutes: u32,
    pub resource_views: u64,
    pub trend: Vec<TrendPoint>,
}

/// Everything the dashboard aggregates over.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsInput<'a> {
    pub assessments: &'a [AssessmentRecord],
    pub bookings: &'a [Booking],
    pub chats: &'a [ChatInteraction],
    pub resources: &'a [Resource],
}

fn utc_date(ts: jiff::Timestamp) -> Date {
    ts.to_zoned(TimeZone::UTC).date()
}

/// Aggregate stored records. Totals cover all records; `trend` has one point
/// per day of `range`, ending at `today`.
pub fn summarize(input: AnalyticsInput<'_>, range: TimeRange, today: Date) -> AnalyticsSummary {
    let mut risk_distribution = RiskDistribution::default();
    for record in input.assessments {
        risk_distribution.record(record.risk_level);
    }

    let confirmed: Vec<&Booking> = input
        .bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .collect();

    let crisis_detections = input
        .chats
        .iter()
        .filter(|c| c.crisis_keywords_detected)
        .count() as u32;

    let average_session_minutes = if input.chats.is_empty() {
        0
    } else {
        let total: u64 = input
            .chats
            .iter()
            .map(|c| u64::from(c.session_duration_minutes))
            .sum();
        (total as f64 / input.chats.len() as f64).round() as u32
    };

    let start = today.saturating_sub(Span::new().days(range.days() - 1));
    let trend = start
        .series(Span::new().days(1))
        .take(range.days() as usize)
        .map(|date| TrendPoint {
            date,
            assessments: input
                .assessments
                .iter()
                .filter(|a| utc_date(a.completed_at) == date)
                .count() as u32,
            bookings: confirmed
                .iter()
                .filter(|b| utc_date(b.created_at) == date)
                .count() as u32,
            chats: input
                .chats
                .iter()
                .filter(|c| utc_date(c.created_at) == date)
                .count() as u32,
        })
        .collect();

    AnalyticsSummary {
        range,
        total_assessments: input.assessments.len() as u32,
        risk_distribution,
        total_bookings: confirmed.len() as u32,
        chat_interactions: input.chats.len() as u32,
        crisis_detections,
        average_session_minutes,
        resource_views: input.resources.iter().map(|r| r.view_count).sum(),
        trend,
    }
}

impl AnalyticsSummary {
    /// Render the headline metrics as `Metric,Value` CSV.
    pub fn to_csv(&self) -> String {
        let rows: [(&str, String); 10] = [
            ("Total Assessments", self.total_assessments.to_string()),
            ("Bookings", self.total_bookings.to_string()),
            ("Chat Interactions", self.chat_interactions.to_string()),
            ("Crisis Detections", self.crisis_detections.to_string()),
            (
                "Average Session Minutes",
                self.average_session_minutes.to_string(),
            ),
            ("Resource Views", self.resource_views.to_string()),
            ("Low Risk", self.risk_distribution.low.to_string()),
            ("Moderate Risk", self.risk_distribution.moderate.to_string()),
            ("High Risk", self.risk_distribution.high.to_string()),
            ("Range Days", self.range.days().to_string()),
        ];

        let mut csv = String::from("Metric,Value\n");
        for (metric, value) in rows {
            let _ = writeln!(csv, "{metric},{value}");
        }
        csv
    }
}
