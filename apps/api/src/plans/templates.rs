//! Mission and milestone templates. Expansion is a pure function of the week
//! number, which is what makes the generator deterministic and idempotent.

use crate::models::plan::MISSIONS_PER_WEEK;

pub struct MissionTemplate {
    pub position: i16,
    pub title: String,
    pub description: String,
    pub est_minutes: i32,
}

pub fn milestone_label(week: i16) -> String {
    format!("Week {week} milestone")
}

/// The 5 mission templates for a week. Mission numbering runs continuously
/// across the plan: week 1 holds #1-#5, week 2 holds #6-#10, and so on.
pub fn mission_templates(week: i16) -> Vec<MissionTemplate> {
    (1..=MISSIONS_PER_WEEK)
        .map(|i| MissionTemplate {
            position: i,
            title: format!("Do a 10-min skill rep #{}", (week - 1) * MISSIONS_PER_WEEK + i),
            description: "Refine a resume bullet or apply to 1 role with tailored keywords."
                .to_string(),
            est_minutes: 10,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::WEEKS_PER_PLAN;

    #[test]
    fn test_every_week_gets_five_missions() {
        for week in 1..=WEEKS_PER_PLAN {
            assert_eq!(mission_templates(week).len(), 5);
        }
    }

    #[test]
    fn test_mission_numbering_is_continuous_across_weeks() {
        let week1 = mission_templates(1);
        let week2 = mission_templates(2);
        assert_eq!(week1[0].title, "Do a 10-min skill rep #1");
        assert_eq!(week1[4].title, "Do a 10-min skill rep #5");
        assert_eq!(week2[0].title, "Do a 10-min skill rep #6");

        let week12 = mission_templates(12);
        assert_eq!(week12[4].title, "Do a 10-min skill rep #60");
    }

    #[test]
    fn test_templates_are_deterministic() {
        let a = mission_templates(7);
        let b = mission_templates(7);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.title, y.title);
            assert_eq!(x.description, y.description);
            assert_eq!(x.est_minutes, y.est_minutes);
        }
    }

    #[test]
    fn test_positions_run_one_through_five() {
        let positions: Vec<i16> = mission_templates(3).iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_milestone_label_carries_week_number() {
        assert_eq!(milestone_label(1), "Week 1 milestone");
        assert_eq!(milestone_label(12), "Week 12 milestone");
    }
}
