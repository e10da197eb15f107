use crate::ambulance::Ambulance;
use crate::ampulario::AmpularioMaterial;
use crate::config::AlertConfig;
use crate::material::ConsumableMaterial;
use crate::types::{AlertKind, AlertSource, Severity, WorkflowStep};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alert (output)
// ---------------------------------------------------------------------------

/// Derived record. Alerts are never stored; they are recomputed from the
/// current entities every time the feed is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Stable across recomputations: `{kind}:{source_id}`.
    pub id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub source: AlertSource,
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambulance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    pub title: String,
    pub message: String,
    /// Days until expiry (negative once expired) for material alerts; days
    /// since the last action, rounded up, for workflow alerts, `None` if it
    /// never happened.
    pub days: Option<i64>,
    /// Expiry date or date of the last action; drives recency ordering.
    pub reference_date: Option<NaiveDate>,
    pub generated_at: DateTime<Utc>,
}

/// Borrowed view of the collections the scan reads.
pub struct Snapshot<'a> {
    pub ambulances: &'a [Ambulance],
    pub consumables: &'a [ConsumableMaterial],
    pub ampulario: &'a [AmpularioMaterial],
}

// ---------------------------------------------------------------------------
// Expiry classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryClass {
    Expired,
    ExpiringSoon,
}

/// `expiry` strictly before `today` is expired; within `window_days`
/// (boundary day included) is expiring soon; anything later is fine.
pub fn classify_expiry(expiry: NaiveDate, today: NaiveDate, window_days: i64) -> Option<ExpiryClass> {
    let days_left = (expiry - today).num_days();
    if days_left < 0 {
        Some(ExpiryClass::Expired)
    } else if days_left <= window_days {
        Some(ExpiryClass::ExpiringSoon)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// One linear pass over the snapshot. Output is in scan order: ambulances,
/// then consumables, then ampulario stock.
pub fn generate(snapshot: &Snapshot<'_>, cfg: &AlertConfig, now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let today = now.date_naive();

    for amb in snapshot.ambulances {
        if let Some(alert) = workflow_alert(amb, cfg, now) {
            alerts.push(alert);
        }
    }

    for item in snapshot.consumables {
        let Some(expiry) = item.expiry_date else {
            continue;
        };
        if let Some(class) = classify_expiry(expiry, today, cfg.consumable_expiry_days) {
            alerts.push(expiry_alert(
                class,
                AlertSource::Consumable,
                &item.id,
                &item.name,
                expiry,
                today,
                now,
                Some(item.ambulance_id.clone()),
                None,
            ));
        }
    }

    for item in snapshot.ampulario {
        if let Some(class) = classify_expiry(item.expiry_date, today, cfg.ampulario_expiry_days) {
            alerts.push(expiry_alert(
                class,
                AlertSource::Ampulario,
                &item.id,
                &item.name,
                item.expiry_date,
                today,
                now,
                None,
                Some(item.space_id.clone()),
            ));
        }
    }

    alerts
}

/// Severity first, then the most recent reference date. Stable, so equal
/// alerts keep scan order.
pub fn sort_by_priority(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.reference_date.cmp(&a.reference_date))
    });
}

/// Elapsed days rounded up, so anything past the threshold reports at least
/// `threshold + 1`.
fn whole_days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = now - then;
    let days = elapsed.num_days();
    if elapsed > Duration::days(days) {
        days + 1
    } else {
        days
    }
}

fn workflow_alert(amb: &Ambulance, cfg: &AlertConfig, now: DateTime<Utc>) -> Option<Alert> {
    let (step, kind, threshold) = if !amb.workflow.mechanical_review_completed {
        (
            WorkflowStep::Mechanical,
            AlertKind::ReviewPending,
            cfg.review_overdue_days,
        )
    } else if !amb.workflow.cleaning_completed {
        (
            WorkflowStep::Cleaning,
            AlertKind::CleaningPending,
            cfg.cleaning_overdue_days,
        )
    } else {
        return None;
    };

    let last = amb.last_action(step);
    if let Some(last) = last {
        if now - last <= Duration::days(threshold) {
            return None;
        }
    }

    let days = last.map(|l| whole_days_since(l, now));
    let what = match kind {
        AlertKind::ReviewPending => "Mechanical review",
        _ => "Cleaning",
    };
    let message = match days {
        Some(d) => format!("{what} of {} pending; last done {d} days ago", amb.name),
        None => format!("{what} of {} pending; never recorded", amb.name),
    };

    Some(Alert {
        id: format!("{kind}:{}", amb.id),
        kind,
        severity: Severity::Medium,
        source: AlertSource::Ambulance,
        source_id: amb.id.clone(),
        ambulance_id: Some(amb.id.clone()),
        space_id: None,
        title: format!("{what} pending"),
        message,
        days,
        reference_date: last.map(|l| l.date_naive()),
        generated_at: now,
    })
}

#[allow(clippy::too_many_arguments)]
fn expiry_alert(
    class: ExpiryClass,
    source: AlertSource,
    id: &str,
    name: &str,
    expiry: NaiveDate,
    today: NaiveDate,
    now: DateTime<Utc>,
    ambulance_id: Option<String>,
    space_id: Option<String>,
) -> Alert {
    let days_left = (expiry - today).num_days();
    let (kind, severity, title, message) = match class {
        ExpiryClass::Expired => (
            AlertKind::Expired,
            Severity::High,
            format!("{name} expired"),
            format!("{name} expired on {expiry} ({} days ago)", -days_left),
        ),
        ExpiryClass::ExpiringSoon => (
            AlertKind::ExpiringSoon,
            Severity::Medium,
            format!("{name} expiring soon"),
            format!("{name} expires on {expiry} (in {days_left} days)"),
        ),
    };

    Alert {
        id: format!("{kind}:{id}"),
        kind,
        severity,
        source,
        source_id: id.to_string(),
        ambulance_id,
        space_id,
        title,
        message,
        days: Some(days_left),
        reference_date: Some(expiry),
        generated_at: now,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ampulario::MaterialInput;
    use crate::material::NewConsumable;
    use crate::types::Route;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap()
    }

    fn day(offset: i64) -> NaiveDate {
        now().date_naive() + Duration::days(offset)
    }

    fn ampoule(id: &str, expiry: NaiveDate) -> AmpularioMaterial {
        let mut m = MaterialInput {
            name: format!("Drug {id}"),
            dose: "1".into(),
            unit: "mg".into(),
            quantity: 5,
            route: Route::Iv,
            expiry_date: expiry,
            space_id: "cabinet-a".into(),
        }
        .into_material(now());
        m.id = id.to_string();
        m
    }

    fn consumable(id: &str, expiry: Option<NaiveDate>) -> ConsumableMaterial {
        let mut c = NewConsumable {
            name: format!("Item {id}"),
            quantity: 10,
            expiry_date: expiry,
        }
        .into_material("amb-01", now());
        c.id = id.to_string();
        c
    }

    fn scan(
        ambulances: &[Ambulance],
        consumables: &[ConsumableMaterial],
        ampulario: &[AmpularioMaterial],
    ) -> Vec<Alert> {
        let snap = Snapshot {
            ambulances,
            consumables,
            ampulario,
        };
        generate(&snap, &AlertConfig::default(), now())
    }

    #[test]
    fn classify_boundaries() {
        let today = day(0);
        assert_eq!(classify_expiry(day(-1), today, 3), Some(ExpiryClass::Expired));
        assert_eq!(classify_expiry(day(0), today, 3), Some(ExpiryClass::ExpiringSoon));
        assert_eq!(classify_expiry(day(3), today, 3), Some(ExpiryClass::ExpiringSoon));
        assert_eq!(classify_expiry(day(4), today, 3), None);
    }

    #[test]
    fn expired_material_yields_exactly_one_expired_alert() {
        let alerts = scan(&[], &[consumable("c1", Some(day(-2)))], &[ampoule("a1", day(-1))]);

        assert_eq!(alerts.len(), 2);
        for a in &alerts {
            assert_eq!(a.kind, AlertKind::Expired);
            assert_eq!(a.severity, Severity::High);
        }
        assert_eq!(alerts[1].id, "expired:a1");
        assert_eq!(alerts[1].days, Some(-1));
    }

    #[test]
    fn ampulario_window_is_three_days() {
        let alerts = scan(&[], &[], &[ampoule("in", day(3)), ampoule("out", day(4))]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].source_id, "in");
        assert_eq!(alerts[0].kind, AlertKind::ExpiringSoon);
        assert_eq!(alerts[0].severity, Severity::Medium);
        assert_eq!(alerts[0].space_id.as_deref(), Some("cabinet-a"));
    }

    #[test]
    fn consumable_window_is_seven_days() {
        let alerts = scan(
            &[],
            &[
                consumable("in", Some(day(7))),
                consumable("out", Some(day(8))),
                consumable("none", None),
            ],
            &[],
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].source_id, "in");
        assert_eq!(alerts[0].ambulance_id.as_deref(), Some("amb-01"));
    }

    #[test]
    fn stale_review_raises_review_pending() {
        let mut amb = Ambulance::new("amb-01", "Alpha 1", "1234-ABC");
        amb.last_mechanical_review = Some(now() - Duration::days(15));

        let alerts = scan(&[amb.clone()], &[], &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::ReviewPending);
        assert_eq!(alerts[0].days, Some(15));

        amb.last_mechanical_review = Some(now() - Duration::days(14));
        assert!(scan(&[amb], &[], &[]).is_empty());
    }

    #[test]
    fn partial_day_past_threshold_counts_as_next_day() {
        let mut amb = Ambulance::new("amb-01", "Alpha 1", "1234-ABC");
        amb.last_mechanical_review = Some(now() - Duration::days(14) - Duration::hours(3));

        let alerts = scan(&[amb], &[], &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days, Some(15));
        assert!(alerts[0].message.ends_with("last done 15 days ago"));
    }

    #[test]
    fn never_reviewed_is_pending() {
        let amb = Ambulance::new("amb-02", "Alpha 2", "5678-DEF");
        let alerts = scan(&[amb], &[], &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days, None);
        assert!(alerts[0].message.contains("never recorded"));
    }

    #[test]
    fn stale_cleaning_only_after_mechanical() {
        let mut amb = Ambulance::new("amb-03", "Alpha 3", "9012-GHI");
        amb.workflow.mechanical_review_completed = true;
        amb.last_mechanical_review = Some(now());
        amb.last_cleaning = Some(now() - Duration::days(8));

        let alerts = scan(&[amb.clone()], &[], &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::CleaningPending);
        assert_eq!(alerts[0].id, "cleaning_pending:amb-03");

        amb.workflow.cleaning_completed = true;
        assert!(scan(&[amb], &[], &[]).is_empty());
    }

    #[test]
    fn priority_sort_puts_high_severity_first() {
        let mut alerts = scan(
            &[],
            &[consumable("soon", Some(day(2)))],
            &[ampoule("old", day(-10)), ampoule("recent", day(-1))],
        );
        sort_by_priority(&mut alerts);

        let ids: Vec<_> = alerts.iter().map(|a| a.source_id.as_str()).collect();
        assert_eq!(ids, vec!["recent", "old", "soon"]);
    }
}
