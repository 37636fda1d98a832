//! High-level report composition: turns the raw collections into the named
//! sections of a business report, then assembles them into one document.
//! Everything here is a pure function of its inputs — no I/O, no shared
//! state, and each section builder is independently computable.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::compare::{compare, Comparison};
use crate::error::{Error, Result};
use crate::link::{EntityIndex, RecordRef};
use crate::metrics::{
    aggregate, aggregate_by, count_by, duration_aggregate, group_by_day, group_by_hour,
    percentage, round2, top_n,
};
use crate::model::{
    CheckIn, Member, Package, Payment, PaymentStatus, Schedule, ScheduleStatus, Subscription,
};
use crate::range::{filter_by_range, DateRange};
use crate::report::{assemble, AssembleOptions, Cell, Report, Row, Section};

/// The raw collections a report is computed from. Missing collections are
/// simply empty — their sections come out with zero counts.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub members: Vec<Member>,
    pub subscriptions: Vec<Subscription>,
    pub payments: Vec<Payment>,
    pub check_ins: Vec<CheckIn>,
    pub schedules: Vec<Schedule>,
    pub packages: Vec<Package>,
}

impl Collections {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
            && self.subscriptions.is_empty()
            && self.payments.is_empty()
            && self.check_ins.is_empty()
            && self.schedules.is_empty()
            && self.packages.is_empty()
    }
}

/// Which sections the report includes.
#[derive(Debug, Clone, Copy)]
pub struct SectionSelection {
    pub members: bool,
    pub revenue: bool,
    pub attendance: bool,
    pub sessions: bool,
    pub packages: bool,
}

impl Default for SectionSelection {
    fn default() -> Self {
        Self {
            members: true,
            revenue: true,
            attendance: true,
            sessions: true,
            packages: true,
        }
    }
}

impl SectionSelection {
    pub fn none() -> Self {
        Self {
            members: false,
            revenue: false,
            attendance: false,
            sessions: false,
            packages: false,
        }
    }
}

/// Everything that parameterizes one report run. Fully config-driven — there
/// is no hidden global state.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub range: DateRange,
    /// Second window to contrast against; adds the Comparison section.
    pub compare_range: Option<DateRange>,
    pub sections: SectionSelection,
    /// How many entries Top-N rankings keep.
    pub top_n: usize,
    /// The clock used for the active-subscription rule. `None` means the
    /// wall clock; tests pin it.
    pub now: Option<NaiveDateTime>,
    pub assemble: AssembleOptions,
}

impl ReportParams {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            compare_range: None,
            sections: SectionSelection::default(),
            top_n: 10,
            now: None,
            assemble: AssembleOptions::default(),
        }
    }

    pub fn compare_with(mut self, range: DateRange) -> Self {
        self.compare_range = Some(range);
        self
    }

    pub fn select(mut self, sections: SectionSelection) -> Self {
        self.sections = sections;
        self
    }

    pub fn top(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }
}

/// Build the full report. The only hard failures are caller bugs: no input
/// collections at all, or an invalid range (rejected at `DateRange`
/// construction). Data-quality issues never abort — a bad record is at
/// worst missing from one section.
pub fn build_report(collections: &Collections, params: &ReportParams) -> Result<Report> {
    if collections.is_empty() {
        return Err(Error::NoInput);
    }
    let now = params.now.unwrap_or_else(|| chrono::Local::now().naive_local());
    log::debug!("building report over {}", params.range);

    let mut sections = Vec::new();
    if params.sections.members {
        sections.push(members_section(collections, &params.range, now));
    }
    if params.sections.revenue {
        sections.extend(revenue_sections(collections, &params.range));
    }
    if params.sections.attendance {
        sections.extend(attendance_sections(collections, &params.range, params.top_n));
    }
    if params.sections.sessions {
        sections.extend(session_sections(collections, &params.range, params.top_n));
    }
    if params.sections.packages {
        sections.push(packages_section(collections));
    }
    if let Some(compare_range) = &params.compare_range {
        sections.push(comparison_section(collections, &params.range, compare_range));
    }
    Ok(assemble(sections, &params.assemble))
}

/// Membership counts: totals, new joiners in the window, active-subscription
/// holders, and the breakdown by membership level.
pub fn members_section(c: &Collections, range: &DateRange, now: NaiveDateTime) -> Section {
    let new_members = filter_by_range(&c.members, range);

    // One pass over subscriptions instead of a scan per member
    let mut holders: HashSet<String> = HashSet::new();
    for subscription in &c.subscriptions {
        if subscription.is_active(now) {
            if let Some(id) = subscription.member_id.as_ref().and_then(RecordRef::resolve_id) {
                holders.insert(id);
            }
        }
    }
    let with_active = c.members.iter().filter(|m| holders.contains(&m.id)).count();

    let mut section = Section::new("Members").with_column_widths(vec![32, 12]);
    section.push(Row::new().field("Metric", "Total members").field("Value", c.members.len()));
    section.push(
        Row::new()
            .field("Metric", "New members in range")
            .field("Value", new_members.len()),
    );
    section.push(
        Row::new()
            .field("Metric", "Members with active subscription")
            .field("Value", with_active),
    );

    let all: Vec<&Member> = c.members.iter().collect();
    let by_level = count_by(&all, |m| {
        Some(m.membership_level.clone().unwrap_or_else(|| "Unspecified".into()))
    });
    for (level, count) in by_level {
        section.push(Row::new().field("Metric", format!("Level: {level}")).field("Value", count));
    }
    section
}

/// Revenue over the window. Only Completed payments count towards revenue;
/// refunds and failures are reported as counts alongside.
pub fn revenue_sections(c: &Collections, range: &DateRange) -> Vec<Section> {
    let in_range = filter_by_range(&c.payments, range);
    let completed: Vec<&Payment> = in_range
        .iter()
        .copied()
        .filter(|p| p.payment_status == PaymentStatus::Completed)
        .collect();
    let status_count = |status: PaymentStatus| {
        in_range.iter().filter(|p| p.payment_status == status).count()
    };
    let refunded_sum: f64 = in_range
        .iter()
        .filter(|p| p.payment_status == PaymentStatus::Refunded)
        .map(|p| p.amount)
        .sum();

    let agg = aggregate(&completed, |p| Some(p.amount));

    let mut summary = Section::new("Revenue").with_column_widths(vec![32, 10, 14]);
    summary.push(
        Row::new()
            .field("Metric", "Completed payments")
            .field("Count", agg.count)
            .field("Amount", round2(agg.sum)),
    );
    summary.push(
        Row::new()
            .field("Metric", "Average payment")
            .field("Count", agg.count)
            .field("Amount", round2(agg.average)),
    );
    summary.push(
        Row::new()
            .field("Metric", "Refunded payments")
            .field("Count", status_count(PaymentStatus::Refunded))
            .field("Amount", round2(refunded_sum)),
    );
    summary.push(
        Row::new()
            .field("Metric", "Failed payments")
            .field("Count", status_count(PaymentStatus::Failed))
            .field("Amount", Cell::NotApplicable),
    );
    summary.push(
        Row::new()
            .field("Metric", "Pending payments")
            .field("Count", status_count(PaymentStatus::Pending))
            .field("Amount", Cell::NotApplicable),
    );

    let by_method = aggregate_by(
        &completed,
        |p| p.payment_method.clone().unwrap_or_else(|| "Unspecified".into()),
        |p| Some(p.amount),
    );
    for group in by_method {
        summary.push(
            Row::new()
                .field("Metric", format!("Method: {}", group.key))
                .field("Count", group.count)
                .field("Amount", round2(group.sum)),
        );
    }

    // Payment → Subscription → Package, via the id index; an unresolved
    // chain lands in the "N/A" bucket rather than failing the section.
    let subscriptions = EntityIndex::build(&c.subscriptions);
    let packages = EntityIndex::build(&c.packages);
    let by_package = aggregate_by(
        &completed,
        |p| package_label(p, &subscriptions, &packages),
        |p| Some(p.amount),
    );
    for group in by_package {
        summary.push(
            Row::new()
                .field("Metric", format!("Package: {}", group.key))
                .field("Count", group.count)
                .field("Amount", round2(group.sum)),
        );
    }

    let mut by_day = Section::new("Revenue by Day").with_column_widths(vec![12, 10, 14]);
    for group in group_by_day(&completed, |p| Some(p.amount)) {
        by_day.push(
            Row::new()
                .field("Date", group.key)
                .field("Payments", group.count)
                .field("Amount", round2(group.sum)),
        );
    }

    vec![summary, by_day]
}

fn package_label(
    payment: &Payment,
    subscriptions: &EntityIndex<'_, Subscription>,
    packages: &EntityIndex<'_, Package>,
) -> String {
    subscriptions
        .get(payment.subscription_id.as_ref())
        .and_then(|s| packages.get(s.package_id.as_ref()))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Attendance over the window: counts, derived visit durations, the
/// hour-of-day histogram, and the Top-N most frequent visitors.
pub fn attendance_sections(c: &Collections, range: &DateRange, top: usize) -> Vec<Section> {
    let in_range = filter_by_range(&c.check_ins, range);
    let durations = duration_aggregate(&in_range, CheckIn::duration_minutes);

    let unique: HashSet<String> = in_range
        .iter()
        .filter_map(|ci| ci.member_id.as_ref().and_then(RecordRef::resolve_id))
        .collect();

    let mut summary = Section::new("Attendance").with_column_widths(vec![32, 12]);
    summary.push(Row::new().field("Metric", "Check-ins").field("Value", in_range.len()));
    summary.push(Row::new().field("Metric", "Unique members").field("Value", unique.len()));
    summary.push(
        Row::new()
            .field("Metric", "Timed visits")
            .field("Value", durations.timed_count),
    );
    summary.push(
        Row::new()
            .field("Metric", "Total visit minutes")
            .field("Value", durations.total_minutes),
    );
    summary.push(
        Row::new()
            .field("Metric", "Total visit hours")
            .field("Value", durations.total_hours),
    );
    summary.push(
        Row::new()
            .field("Metric", "Average visit minutes")
            .field("Value", durations.average_minutes),
    );

    let mut by_hour = Section::new("Attendance by Hour").with_column_widths(vec![8, 12]);
    for (hour, count) in group_by_hour(&in_range).iter().enumerate() {
        by_hour.push(
            Row::new()
                .field("Hour", format!("{hour:02}:00"))
                .field("Check-ins", *count),
        );
    }

    let members = EntityIndex::build(&c.members);
    let visit_counts = count_by(&in_range, |ci| {
        ci.member_id.as_ref().and_then(RecordRef::resolve_id)
    });
    let mut top_members = Section::new("Top Members by Visits").with_column_widths(vec![6, 24, 8]);
    for (rank, (member_id, visits)) in top_n(visit_counts, top).into_iter().enumerate() {
        let name = members
            .get_id(&member_id)
            .map(|m| Cell::Text(m.name.clone()))
            .unwrap_or(Cell::NotApplicable);
        top_members.push(
            Row::new()
                .field("Rank", rank + 1)
                .field("Member", name)
                .field("Visits", visits),
        );
    }

    vec![summary, by_hour, top_members]
}

/// Personal-training sessions over the window, plus the Top-N trainers by
/// completed sessions.
pub fn session_sections(c: &Collections, range: &DateRange, top: usize) -> Vec<Section> {
    let in_range = filter_by_range(&c.schedules, range);
    let completed: Vec<&Schedule> = in_range
        .iter()
        .copied()
        .filter(|s| s.status == ScheduleStatus::Completed)
        .collect();
    let status_count =
        |status: ScheduleStatus| in_range.iter().filter(|s| s.status == status).count();
    let hours = duration_aggregate(&completed, |s| s.duration_minutes.unwrap_or(0));

    let mut summary = Section::new("PT Sessions").with_column_widths(vec![32, 12]);
    summary.push(Row::new().field("Metric", "Sessions in range").field("Value", in_range.len()));
    summary.push(
        Row::new()
            .field("Metric", "Confirmed")
            .field("Value", status_count(ScheduleStatus::Confirmed)),
    );
    summary.push(
        Row::new()
            .field("Metric", "Completed")
            .field("Value", completed.len()),
    );
    summary.push(
        Row::new()
            .field("Metric", "Cancelled")
            .field("Value", status_count(ScheduleStatus::Cancelled)),
    );
    summary.push(
        Row::new()
            .field("Metric", "Completion rate %")
            .field("Value", percentage(completed.len() as f64, in_range.len() as f64)),
    );
    summary.push(
        Row::new()
            .field("Metric", "Completed session hours")
            .field("Value", hours.total_hours),
    );

    // Populated trainer references carry a display name; a bare id is shown
    // as-is since there is no trainer collection to resolve against.
    let mut trainer_names: HashMap<String, String> = HashMap::new();
    for session in &completed {
        if let Some(reference) = session.trainer_id.as_ref() {
            if let (Some(id), Some(name)) = (reference.resolve_id(), reference.embedded_name()) {
                trainer_names.entry(id).or_insert_with(|| name.to_string());
            }
        }
    }
    let session_counts = count_by(&completed, |s| {
        s.trainer_id.as_ref().and_then(RecordRef::resolve_id)
    });
    let mut top_trainers =
        Section::new("Top Trainers by Sessions").with_column_widths(vec![6, 24, 10]);
    for (rank, (trainer_id, sessions)) in top_n(session_counts, top).into_iter().enumerate() {
        let trainer = trainer_names.get(&trainer_id).cloned().unwrap_or(trainer_id);
        top_trainers.push(
            Row::new()
                .field("Rank", rank + 1)
                .field("Trainer", trainer)
                .field("Sessions", sessions),
        );
    }

    vec![summary, top_trainers]
}

/// Package catalog breakdown by type. Packages have no date field; this
/// section ignores the report window.
pub fn packages_section(c: &Collections) -> Section {
    let all: Vec<&Package> = c.packages.iter().collect();
    let agg = aggregate(&all, |p| Some(p.price));

    let mut section = Section::new("Packages").with_column_widths(vec![14, 8, 14]);
    section.push(
        Row::new()
            .field("Type", "All")
            .field("Count", agg.count)
            .field("Avg Price", round2(agg.average)),
    );
    for group in aggregate_by(&all, |p| p.package_type.label().to_string(), |p| Some(p.price)) {
        section.push(
            Row::new()
                .field("Type", group.key)
                .field("Count", group.count)
                .field("Avg Price", round2(group.average)),
        );
    }
    section
}

/// Cross-period deltas: the same metrics over two independent windows, with
/// growth rates. Only present when a second range was requested.
pub fn comparison_section(c: &Collections, range1: &DateRange, range2: &DateRange) -> Section {
    let completed: Vec<&Payment> = c
        .payments
        .iter()
        .filter(|p| p.payment_status == PaymentStatus::Completed)
        .collect();

    let revenue = compare(&completed, range1, Some(range2), |p| Some(p.amount));
    let check_ins = compare(&c.check_ins, range1, Some(range2), |_| None);
    let members = compare(&c.members, range1, Some(range2), |_| None);
    let sessions = compare(&c.schedules, range1, Some(range2), |_| None);

    let mut section = Section::new("Comparison").with_column_widths(vec![24, 14, 14, 10, 10]);
    section.push(
        Row::new()
            .field("Metric", "Window")
            .field("Range 1", range1.label())
            .field("Range 2", range2.label()),
    );
    section.push(sum_row("Total revenue", &revenue));
    section.push(count_row("Completed payments", &revenue));
    section.push(count_row("Check-ins", &check_ins));
    section.push(count_row("New members", &members));
    section.push(count_row("PT sessions", &sessions));
    section
}

fn count_row(label: &str, comparison: &Comparison) -> Row {
    let mut row = Row::new()
        .field("Metric", label)
        .field("Range 1", comparison.range1.count);
    if let (Some(second), Some(delta)) = (&comparison.range2, &comparison.delta) {
        row = row
            .field("Range 2", second.count)
            .field("Delta", delta.count)
            .field("Growth", delta.count_growth.clone());
    }
    row
}

fn sum_row(label: &str, comparison: &Comparison) -> Row {
    let mut row = Row::new()
        .field("Metric", label)
        .field("Range 1", round2(comparison.range1.sum));
    if let (Some(second), Some(delta)) = (&comparison.range2, &comparison.delta) {
        row = row
            .field("Range 2", round2(second.sum))
            .field("Delta", round2(delta.sum))
            .field("Growth", delta.sum_growth.clone());
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckInStatus, SubscriptionStatus};
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32) -> Option<NaiveDateTime> {
        Some(
            NaiveDate::from_ymd_opt(2024, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    }

    fn payment(id: &str, amount: f64, status: PaymentStatus, m: u32, d: u32) -> Payment {
        Payment {
            id: id.into(),
            subscription_id: None,
            member_id: None,
            amount,
            original_amount: None,
            payment_status: status,
            payment_date: at(m, d, 10),
            created_at: None,
            payment_method: Some("Cash".into()),
            payment_type: None,
        }
    }

    fn member(id: &str, name: &str) -> Member {
        Member {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: None,
            membership_level: Some("Gold".into()),
            created_at: at(3, 2, 9),
            status: None,
        }
    }

    fn check_in(id: &str, member: &str, m: u32, d: u32, h: u32) -> CheckIn {
        CheckIn {
            id: id.into(),
            member_id: Some(RecordRef::Text(member.into())),
            check_in_time: at(m, d, h),
            check_out_time: at(m, d, h + 1),
            status: CheckInStatus::Completed,
        }
    }

    fn scenario() -> Collections {
        Collections {
            members: vec![member("m1", "Avery"), member("m2", "Blake"), member("m3", "Casey")],
            payments: vec![
                payment("p1", 100.0, PaymentStatus::Completed, 3, 5),
                payment("p2", 200.0, PaymentStatus::Completed, 3, 20),
                payment("p3", 50.0, PaymentStatus::Failed, 3, 21),
                payment("p4", 400.0, PaymentStatus::Completed, 4, 10),
            ],
            check_ins: vec![
                check_in("c1", "m1", 3, 5, 18),
                check_in("c2", "m1", 3, 6, 18),
                check_in("c3", "m2", 3, 7, 7),
            ],
            ..Default::default()
        }
    }

    fn params() -> ReportParams {
        ReportParams::new(DateRange::parse("2024-03").unwrap())
            .compare_with(DateRange::parse("2024-04").unwrap())
            .at(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    fn find_row<'a>(section: &'a Section, field: &str, label: &str) -> &'a Row {
        section
            .rows
            .iter()
            .find(|r| r.get(field) == Some(&Cell::Text(label.into())))
            .unwrap_or_else(|| panic!("no row {label:?} in {}", section.title))
    }

    fn section<'a>(report: &'a Report, title: &str) -> &'a Section {
        report
            .sections
            .iter()
            .find(|s| s.title == title)
            .unwrap_or_else(|| panic!("no section {title:?}"))
    }

    #[test]
    fn empty_collections_are_a_caller_bug() {
        let result = build_report(&Collections::default(), &params());
        assert!(matches!(result, Err(Error::NoInput)));
    }

    #[test]
    fn end_to_end_comparison_scenario() {
        let report = build_report(&scenario(), &params()).unwrap();
        let comparison = section(&report, "Comparison");

        let revenue = find_row(comparison, "Metric", "Total revenue");
        assert_eq!(revenue.get("Range 1"), Some(&Cell::Float(300.0)));
        assert_eq!(revenue.get("Range 2"), Some(&Cell::Float(400.0)));
        assert_eq!(revenue.get("Delta"), Some(&Cell::Float(100.0)));
        assert_eq!(revenue.get("Growth"), Some(&Cell::Text("33.33%".into())));
    }

    #[test]
    fn revenue_ignores_non_completed_amounts() {
        let collections = scenario();
        let report = build_report(&collections, &params()).unwrap();
        let row = find_row(section(&report, "Revenue"), "Metric", "Completed payments");
        assert_eq!(row.get("Amount"), Some(&Cell::Float(300.0)));
        assert_eq!(row.get("Count"), Some(&Cell::Int(2)));

        // Inflating the failed payment moves nothing
        let mut inflated = collections;
        inflated.payments[2].amount = 5000.0;
        let report = build_report(&inflated, &params()).unwrap();
        let row = find_row(section(&report, "Revenue"), "Metric", "Completed payments");
        assert_eq!(row.get("Amount"), Some(&Cell::Float(300.0)));
    }

    #[test]
    fn failed_payments_report_na_amount() {
        let report = build_report(&scenario(), &params()).unwrap();
        let row = find_row(section(&report, "Revenue"), "Metric", "Failed payments");
        assert_eq!(row.get("Count"), Some(&Cell::Int(1)));
        assert!(row.get("Amount").unwrap().is_na());
    }

    #[test]
    fn attendance_counts_and_rankings() {
        let report = build_report(&scenario(), &params()).unwrap();

        let summary = section(&report, "Attendance");
        assert_eq!(
            find_row(summary, "Metric", "Check-ins").get("Value"),
            Some(&Cell::Int(3))
        );
        assert_eq!(
            find_row(summary, "Metric", "Unique members").get("Value"),
            Some(&Cell::Int(2))
        );

        let by_hour = section(&report, "Attendance by Hour");
        assert_eq!(by_hour.rows.len(), 24);
        assert_eq!(by_hour.rows[7].get("Check-ins"), Some(&Cell::Int(1)));
        assert_eq!(by_hour.rows[18].get("Check-ins"), Some(&Cell::Int(2)));

        let top = section(&report, "Top Members by Visits");
        assert_eq!(top.rows[0].get("Member"), Some(&Cell::Text("Avery".into())));
        assert_eq!(top.rows[0].get("Visits"), Some(&Cell::Int(2)));
    }

    #[test]
    fn unknown_visitor_ranks_as_na() {
        let mut collections = scenario();
        collections.check_ins = vec![
            check_in("c1", "ghost", 3, 5, 18),
            check_in("c2", "ghost", 3, 6, 18),
        ];
        let report = build_report(&collections, &params()).unwrap();
        let top = section(&report, "Top Members by Visits");
        assert_eq!(top.rows[0].get("Member"), Some(&Cell::NotApplicable));
        assert_eq!(top.rows[0].get("Visits"), Some(&Cell::Int(2)));
    }

    #[test]
    fn completion_rate_is_na_with_no_sessions() {
        let report = build_report(&scenario(), &params()).unwrap();
        let row = find_row(section(&report, "PT Sessions"), "Metric", "Completion rate %");
        assert!(row.get("Value").unwrap().is_na());
    }

    #[test]
    fn comparison_section_needs_a_second_range() {
        let single = ReportParams::new(DateRange::parse("2024-03").unwrap());
        let report = build_report(&scenario(), &single).unwrap();
        assert!(report.sections.iter().all(|s| s.title != "Comparison"));
    }

    #[test]
    fn active_subscription_holders_are_counted_once() {
        let mut collections = scenario();
        let sub = |id: &str, member: &str| Subscription {
            id: id.into(),
            member_id: Some(RecordRef::Text(member.into())),
            package_id: None,
            start_date: at(1, 1, 0),
            end_date: at(12, 31, 0),
            status: SubscriptionStatus::Active,
            is_suspended: false,
            pt_sessions_remaining: None,
            pt_sessions_used: None,
        };
        // m1 holds two live subscriptions; still one holder
        collections.subscriptions = vec![sub("s1", "m1"), sub("s2", "m1"), sub("s3", "m2")];

        let report = build_report(&collections, &params()).unwrap();
        let row = find_row(
            section(&report, "Members"),
            "Metric",
            "Members with active subscription",
        );
        assert_eq!(row.get("Value"), Some(&Cell::Int(2)));
    }

    #[test]
    fn section_selection_is_honored() {
        let params = ReportParams::new(DateRange::parse("2024-03").unwrap()).select(
            SectionSelection {
                revenue: true,
                ..SectionSelection::none()
            },
        );
        let report = build_report(&scenario(), &params).unwrap();
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Revenue", "Revenue by Day"]);
    }

    #[test]
    fn revenue_by_day_is_chronological() {
        let report = build_report(&scenario(), &params()).unwrap();
        let by_day = section(&report, "Revenue by Day");
        let days: Vec<&Cell> = by_day.rows.iter().filter_map(|r| r.get("Date")).collect();
        assert_eq!(
            days,
            vec![&Cell::Text("2024-03-05".into()), &Cell::Text("2024-03-20".into())]
        );
    }
}
