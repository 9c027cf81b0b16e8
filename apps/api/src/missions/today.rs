//! Today Selector: picks the single mission a user should work on now.
//!
//! Pure read over the active plan. Ordering is total — `today` status first,
//! then `(week_number, position, id)` ascending — so repeated calls against
//! the same snapshot always return the same mission.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TodayMission {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub est_minutes: i32,
    pub status: String,
    pub week_number: i16,
    pub position: i16,
}

/// Deterministic selection over candidate missions: a mission already marked
/// `today` wins; otherwise the earliest `pending` one.
pub fn pick_next(missions: &[TodayMission]) -> Option<&TodayMission> {
    let order = |m: &&TodayMission| (m.week_number, m.position, m.id);

    missions
        .iter()
        .filter(|m| m.status == "today")
        .min_by_key(order)
        .or_else(|| {
            missions
                .iter()
                .filter(|m| m.status == "pending")
                .min_by_key(order)
        })
}

/// Returns the user's current mission, or `None` when there is no active
/// plan or every mission is completed.
pub async fn current_mission(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<TodayMission>, AppError> {
    let plan_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM plans
        WHERE user_id = $1 AND status = 'active'
        ORDER BY start_date DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let plan_id = match plan_id {
        Some(id) => id,
        None => return Ok(None),
    };

    let candidates: Vec<TodayMission> = sqlx::query_as(
        r#"
        SELECT m.id, m.title, m.description, m.est_minutes, m.status,
               w.week_number, m.position
        FROM missions m
        JOIN plan_weeks w ON w.id = m.plan_week_id
        WHERE w.plan_id = $1 AND m.status IN ('today', 'pending')
        "#,
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;

    Ok(pick_next(&candidates).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_mission(week: i16, position: i16, status: &str) -> TodayMission {
        TodayMission {
            id: Uuid::new_v4(),
            title: format!("mission w{week}p{position}"),
            description: "desc".to_string(),
            est_minutes: 10,
            status: status.to_string(),
            week_number: week,
            position,
        }
    }

    #[test]
    fn test_today_status_wins_over_earlier_pending() {
        let missions = vec![
            make_mission(1, 1, "pending"),
            make_mission(3, 4, "today"),
            make_mission(2, 2, "pending"),
        ];
        let picked = pick_next(&missions).unwrap();
        assert_eq!(picked.status, "today");
        assert_eq!(picked.week_number, 3);
    }

    #[test]
    fn test_earliest_pending_by_week_then_position() {
        let missions = vec![
            make_mission(2, 1, "pending"),
            make_mission(1, 5, "pending"),
            make_mission(1, 2, "pending"),
        ];
        let picked = pick_next(&missions).unwrap();
        assert_eq!((picked.week_number, picked.position), (1, 2));
    }

    #[test]
    fn test_selection_is_deterministic_across_calls() {
        let missions = vec![
            make_mission(4, 3, "pending"),
            make_mission(4, 1, "pending"),
            make_mission(6, 2, "pending"),
        ];
        let first = pick_next(&missions).unwrap().id;
        let second = pick_next(&missions).unwrap().id;
        assert_eq!(first, second);
    }

    #[test]
    fn test_id_breaks_exact_position_ties() {
        // Two candidates at the same (week, position) cannot normally exist,
        // but the ordering must still be total.
        let mut a = make_mission(1, 1, "pending");
        let mut b = make_mission(1, 1, "pending");
        if a.id > b.id {
            std::mem::swap(&mut a, &mut b);
        }
        let lower = a.id;
        let picked_id = pick_next(&[b, a]).unwrap().id;
        assert_eq!(picked_id, lower);
    }

    #[test]
    fn test_no_candidates_returns_none() {
        assert!(pick_next(&[]).is_none());
        let all_done = vec![make_mission(1, 1, "completed")];
        assert!(pick_next(&all_done).is_none());
    }
}
