use indoc::formatdoc;

use crate::model::BacklogItem;

/// One line per pending item: `- Physics: Rotation (High priority, 3h estimated)`.
pub fn backlog_lines(items: &[&BacklogItem]) -> String {
    items
        .iter()
        .map(|i| {
            format!(
                "- {}: {} ({} priority, {}h estimated)",
                i.subject, i.title, i.priority, i.estimated_hours
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mentor-style request for a three-day plan over the given items.
pub fn build_prompt(pending: &[&BacklogItem]) -> String {
    formatdoc! {"
        I am a JEE student with the following backlog of chapters:
        {lines}

        Can you generate a highly efficient 3-day study plan to clear the most critical backlogs first?
        Focus on Physics, Chemistry, and Maths balance. Be encouraging and brief.
        Use a student-friendly tone like a senior mentor.
        ",
        lines = backlog_lines(pending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewBacklogItem, Priority, Subject};

    #[test]
    fn prompt_lists_every_item() {
        let rotation = NewBacklogItem {
            title: "Rotation".into(),
            subject: Subject::Physics,
            priority: Priority::High,
            estimated_hours: 3.0,
        }
        .into_item()
        .unwrap();
        let alkanes = NewBacklogItem {
            title: "Alkanes".into(),
            subject: Subject::Chemistry,
            priority: Priority::Low,
            estimated_hours: 1.5,
        }
        .into_item()
        .unwrap();

        let prompt = build_prompt(&[&rotation, &alkanes]);
        assert!(prompt.starts_with("I am a JEE student"));
        assert!(prompt.contains("- Physics: Rotation (High priority, 3h estimated)"));
        assert!(prompt.contains("- Chemistry: Alkanes (Low priority, 1.5h estimated)"));
        assert!(prompt.contains("3-day study plan"));
    }
}
