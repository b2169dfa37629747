//! Slot timeline grouping.
//!
//! Turns the per-student slot records into slot → company → students,
//! the shape the timeline tab walks.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::SlotStudent;

/// A student placed by a company in a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotEntry {
    pub name: String,
    pub roll: String,
    pub color: String,
    pub email: String,
}

/// Students one company placed in a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySlot {
    pub company: String,
    pub students: Vec<SlotEntry>,
}

/// All placements of one slot, companies in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotGroup {
    pub slot: String,
    pub companies: Vec<CompanySlot>,
}

impl SlotGroup {
    pub fn placement_count(&self) -> usize {
        self.companies.iter().map(|c| c.students.len()).sum()
    }
}

/// Leading number of a slot label (`"2.3"` → 2). `None` for labels such as
/// `"Pre-placement"`.
fn slot_number(slot: &str) -> Option<u64> {
    let head = slot.split('.').next().unwrap_or_default().trim();
    let digits: &str = &head[..head.find(|c: char| !c.is_ascii_digit()).unwrap_or(head.len())];
    digits.parse().ok()
}

/// Numbered slots first, ascending, ties and unnumbered slots by label.
pub fn compare_slots(a: &str, b: &str) -> Ordering {
    match (slot_number(a), slot_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Group placements by slot, then by company.
pub fn group_by_slot(students: &[SlotStudent]) -> Vec<SlotGroup> {
    let mut groups: Vec<SlotGroup> = Vec::new();
    let mut slot_index: HashMap<&str, usize> = HashMap::new();
    let mut company_index: HashMap<(usize, &str), usize> = HashMap::new();

    for student in students {
        for placement in &student.placements {
            let g = *slot_index.entry(placement.slot.as_str()).or_insert_with(|| {
                groups.push(SlotGroup {
                    slot: placement.slot.clone(),
                    companies: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[g];
            let c = *company_index
                .entry((g, placement.company.as_str()))
                .or_insert_with(|| {
                    group.companies.push(CompanySlot {
                        company: placement.company.clone(),
                        students: Vec::new(),
                    });
                    group.companies.len() - 1
                });
            group.companies[c].students.push(SlotEntry {
                name: student.name.clone(),
                roll: student.roll_number.clone(),
                color: placement.color.clone(),
                email: student.email.clone(),
            });
        }
    }

    groups.sort_by(|a, b| compare_slots(&a.slot, &b.slot));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotPlacement;

    fn student(roll: &str, placements: &[(&str, &str)]) -> SlotStudent {
        SlotStudent {
            roll_number: roll.to_string(),
            name: format!("Student {roll}"),
            department: None,
            cpi: None,
            email: format!("{roll}@example.edu"),
            placements: placements
                .iter()
                .map(|(company, slot)| SlotPlacement {
                    company: company.to_string(),
                    slot: slot.to_string(),
                    color: "#aaa".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_slot_order() {
        let mut slots = vec!["Pre-placement", "10.1", "2.1", "1.2", "1.1", "Extra"];
        slots.sort_by(|a, b| compare_slots(a, b));
        assert_eq!(slots, vec!["1.1", "1.2", "2.1", "10.1", "Extra", "Pre-placement"]);
    }

    #[test]
    fn test_groups_by_slot_then_company() {
        let students = vec![
            student("1", &[("Globex", "2.1"), ("Acme", "1.1")]),
            student("2", &[("Acme", "1.1")]),
            student("3", &[("Initech", "1.1"), ("Acme", "PPO")]),
        ];
        let groups = group_by_slot(&students);

        let slots: Vec<_> = groups.iter().map(|g| g.slot.as_str()).collect();
        assert_eq!(slots, vec!["1.1", "2.1", "PPO"]);

        let first = &groups[0];
        let companies: Vec<_> = first.companies.iter().map(|c| c.company.as_str()).collect();
        assert_eq!(companies, vec!["Acme", "Initech"]);
        assert_eq!(first.companies[0].students.len(), 2);
        assert_eq!(first.companies[0].students[1].roll, "2");
        assert_eq!(first.placement_count(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_slot(&[]).is_empty());
    }
}
